//! Methods command implementation
//!
//! Lists the available root-finding and linear-system methods.

use numsolve_core::linear::LinearMethod;
use numsolve_core::roots::RootMethod;

/// Method listing, one line per method
pub fn listing() -> String {
    let mut out = String::from("Root-finding methods (numsolve roots --method <name>):\n");
    for method in RootMethod::ALL {
        out.push_str(&format!(
            "  {:<20} {:<20} {} argument(s)\n",
            method.name(),
            method.title(),
            method.argument_count()
        ));
    }
    out.push_str("\nLinear-system methods (numsolve linsys --method <name>):\n");
    for method in LinearMethod::ALL {
        let kind = if method.is_iterative() { "iterative" } else { "direct" };
        out.push_str(&format!("  {:<20} {:<20} {}\n", method.name(), method.title(), kind));
    }
    out
}

/// Run the methods command
pub fn run() -> crate::Result<()> {
    print!("{}", listing());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_names_every_method() {
        let text = listing();
        for method in RootMethod::ALL {
            assert!(text.contains(method.name()));
        }
        for method in LinearMethod::ALL {
            assert!(text.contains(method.title()));
        }
    }
}

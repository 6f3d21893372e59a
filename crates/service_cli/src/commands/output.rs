//! Report rendering for the table and JSON formats.

use numsolve_core::{LinearReport, RootReport};

/// Render a root-finding report as one table per stage.
pub fn root_table(report: &RootReport, precision: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} on f(x) = {}\n", report.title, report.function));
    out.push_str(&format!("f'(x) = {}\n", report.derivative));

    for (stage, trace) in report.traces.iter().enumerate() {
        if report.traces.len() > 1 {
            out.push_str(&format!("\nStage {}\n", stage + 1));
        }
        out.push_str(&format!(
            "{:>5}  {:>w$}  {:>w$}  {:>w$}\n",
            "iter",
            "x",
            "f(x)",
            "error",
            w = precision + 8
        ));
        let residuals = report.residuals(stage);
        for (i, (entry, fx)) in trace.iter().zip(residuals).enumerate() {
            out.push_str(&format!(
                "{:>5}  {:>w$.p$}  {:>w$.p$e}  {:>w$.p$e}\n",
                i + 1,
                entry.iterate,
                fx,
                entry.error,
                w = precision + 8,
                p = precision
            ));
        }
    }

    let roots: Vec<String> = report
        .roots
        .iter()
        .map(|r| format!("{:.p$}", r, p = precision))
        .collect();
    out.push_str(&format!(
        "\nroots: [{}]  converged: {}  bound: {:e}  time: {:?}\n",
        roots.join(", "),
        report.converged,
        report.error_bound,
        report.elapsed
    ));
    out
}

/// Render a linear-system report; iterative methods add a sweep table.
pub fn linear_table(report: &LinearReport, precision: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", report.title));

    if !report.trace.is_empty() {
        let n = report.solution.len();
        let mut header = format!("{:>5}", "iter");
        for i in 0..n {
            header.push_str(&format!("  {:>w$}", format!("x{}", i + 1), w = precision + 8));
        }
        header.push_str(&format!("  {:>w$}\n", "error", w = precision + 8));
        out.push_str(&header);

        for (k, entry) in report.trace.iter().enumerate() {
            let mut line = format!("{:>5}", k + 1);
            for value in &entry.iterate {
                line.push_str(&format!("  {:>w$.p$}", value, w = precision + 8, p = precision));
            }
            line.push_str(&format!(
                "  {:>w$.p$e}\n",
                entry.error,
                w = precision + 8,
                p = precision
            ));
            out.push_str(&line);
        }
    }

    for (i, value) in report.solution.iter().enumerate() {
        out.push_str(&format!("x{} = {:.p$}\n", i + 1, value, p = precision));
    }
    out.push_str(&format!(
        "converged: {}  iterations: {}  time: {:?}\n",
        report.converged,
        report.iterations(),
        report.elapsed
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use numsolve_core::expression::{Expression, Polynomial};
    use numsolve_core::linear::{AugmentedMatrix, LinearMethod};
    use numsolve_core::roots::RootMethod;
    use numsolve_core::SolverConfig;
    use std::sync::Arc;

    #[test]
    fn test_root_table_lists_every_iteration() {
        let f: Arc<dyn Expression> = Arc::new(Polynomial::new(vec![1.0, 0.0, -4.0]));
        let report = RootMethod::NewtonRaphson
            .solve(&f, &[3.0], &SolverConfig::default())
            .unwrap();
        let table = root_table(&report, 6);

        assert!(table.starts_with("Newton-Raphson on f(x) = x^2 - 4"));
        // title, derivative, header, rows, blank, summary
        assert_eq!(table.lines().count(), 3 + report.iterations() + 2);
        assert!(table.contains("2.000000"));
    }

    #[test]
    fn test_birge_vieta_table_has_stages() {
        let f: Arc<dyn Expression> =
            Arc::new(Polynomial::new(vec![1.0, -9.0, -2.0, 120.0, -130.0]));
        let report = RootMethod::BirgeVieta
            .solve(&f, &[-3.0], &SolverConfig::default())
            .unwrap();
        let table = root_table(&report, 4);
        assert!(table.contains("Stage 4"));
    }

    #[test]
    fn test_linear_table() {
        let system = AugmentedMatrix::from_rows(&[vec![2.0, 1.0, 3.0], vec![1.0, 3.0, 4.0]]).unwrap();
        let direct = LinearMethod::Gauss
            .solve(system.clone(), None, &SolverConfig::default())
            .unwrap();
        let table = linear_table(&direct, 4);
        assert!(table.contains("x1 = 1.0000"));
        assert!(!table.contains("error"));

        let iterative = LinearMethod::Jacobi
            .solve(system, None, &SolverConfig::default())
            .unwrap();
        let table = linear_table(&iterative, 4);
        assert!(table.contains("error"));
        assert!(table.contains("iterations"));
    }
}

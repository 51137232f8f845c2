//! ASCII rendering of parsed plans

use crate::explain::plan::PlanAnalysis;

const EMPTY_PLAN: &str = "No plan data available to visualize.";

/// Renders one line per scan under an "Execution Plan Tree:" header.
///
/// The total cost line is only added when the cost is non-zero.
pub fn visualize_plan(analysis: &PlanAnalysis) -> String {
    let Some(plan) = analysis.as_parsed().filter(|plan| !plan.is_empty()) else {
        return EMPTY_PLAN.to_string();
    };

    let mut lines = vec!["Execution Plan Tree:".to_string()];
    let last = plan.scans.len() - 1;

    for (i, scan) in plan.scans.iter().enumerate() {
        let prefix = if i == last { "  └─ " } else { "  ├─ " };
        let mut line = format!("{prefix}{}", scan.scan_type);

        if let Some(table) = &scan.table {
            line.push_str(&format!(" on {table}"));
        }
        if let Some(index) = &scan.index {
            line.push_str(&format!(" using {index}"));
        }
        if let Some(warning) = &scan.warning {
            line.push_str(&format!(" [WARNING: {warning}]"));
        }

        lines.push(line);
    }

    if plan.total_cost != 0.0 {
        lines.push(format!("\nTotal Cost: {:.2}", plan.total_cost));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explain::plan::{ParsedPlan, PlanScanRecord};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_scan_with_cost() {
        let plan = ParsedPlan {
            scans: vec![PlanScanRecord::new("Seq Scan").with_table("users")],
            total_cost: 458.0,
            ..ParsedPlan::default()
        };

        assert_eq!(
            visualize_plan(&PlanAnalysis::Parsed(plan)),
            "Execution Plan Tree:\n  └─ Seq Scan on users\n\nTotal Cost: 458.00"
        );
    }

    #[test]
    fn test_branches_and_warnings() {
        let plan = ParsedPlan::from_scans(vec![
            PlanScanRecord::new("ALL")
                .with_table("users")
                .with_warning("Full Table Scan"),
            PlanScanRecord::new("Index Scan")
                .with_table("orders")
                .with_index("orders_pkey"),
        ]);

        assert_eq!(
            visualize_plan(&PlanAnalysis::Parsed(plan)),
            "Execution Plan Tree:\n\
             \x20 ├─ ALL on users [WARNING: Full Table Scan]\n\
             \x20 └─ Index Scan on orders using orders_pkey"
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(
            visualize_plan(&PlanAnalysis::Parsed(ParsedPlan::default())),
            EMPTY_PLAN
        );
        assert_eq!(
            visualize_plan(&PlanAnalysis::unsupported("whatever")),
            EMPTY_PLAN
        );
    }
}

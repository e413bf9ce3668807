use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::money;
use crate::reports::goal_progress;

use super::open_store;

/// ASCII progress bar, e.g. "[#######---] 72%".
fn progress_bar(pct: f64, width: usize) -> String {
    let filled = ((pct / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        pct
    )
}

pub fn list() -> Result<()> {
    let (_, store) = open_store();

    if store.goals.is_empty() {
        println!("No goals set.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Goal", "Target", "Saved", "Progress", "Target Date"]);
    for goal in &store.goals {
        let pct = goal_progress(goal);
        table.add_row(vec![
            Cell::new(goal.id),
            Cell::new(&goal.name),
            Cell::new(money(goal.target_amount)),
            Cell::new(money(goal.saved_amount)),
            Cell::new(progress_bar(pct, 10)),
            Cell::new(
                goal.target_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ),
        ]);
    }
    println!("Savings Goals\n{table}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0.0, 10), "[----------] 0%");
        assert_eq!(progress_bar(100.0, 10), "[##########] 100%");
        assert_eq!(progress_bar(50.0, 10), "[#####-----] 50%");
    }
}

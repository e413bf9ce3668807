use std::io::Write;

use crate::error::Result;
use crate::settings::{load_settings, save_settings};

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub fn run(name: Option<String>, months: Option<u32>) -> Result<()> {
    let mut settings = load_settings();

    let name = match name {
        Some(n) => n,
        None => prompt("Your name: ")?,
    };
    if !name.is_empty() {
        settings.user_name = name;
    }
    if let Some(m) = months {
        settings.months_of_history = m.max(1);
    }

    save_settings(&settings)?;
    println!("Settings saved.");
    if !settings.user_name.is_empty() {
        println!("Hello, {}. Run `kosh` to open the dashboard.", settings.user_name);
    } else {
        println!("Run `kosh` to open the dashboard.");
    }
    Ok(())
}

//! Prints the scripted sequences.

use anyhow::{Context, Result};
use prisma_core::Script;

pub fn run(script: &Script, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(script).context("serialize script")?;
        println!("{out}");
        return Ok(());
    }

    print!("{}", format_script(script));
    Ok(())
}

fn format_script(script: &Script) -> String {
    let mut out = format!("Chat ({} messages)\n", script.chat_len());
    for (i, message) in script.chat().iter().enumerate() {
        let text = message.text.replace('\n', " / ");
        out.push_str(&format!("{:>3}. {:<8} {}\n", i + 1, message.sender.label(), text));
    }

    out.push_str(&format!("\nLogs ({} entries)\n", script.log_len()));
    for (i, event) in script.logs().iter().enumerate() {
        let severity = event.severity.map_or("", |s| s.label());
        out.push_str(&format!(
            "{:>3}. {:<6} {}: {}\n",
            i + 1,
            severity,
            event.step,
            event.detail
        ));
    }
    out
}

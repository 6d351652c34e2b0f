use crate::model::Comparison;
use anyhow::Result;

pub fn print_json(results: &[Comparison]) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    println!("{}", json);
    Ok(())
}

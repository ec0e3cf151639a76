//! Print the host's target triple
use anyhow::Result;
use loam_bin_schema::resolve_target;

pub fn target(json: bool) -> Result<()> {
    let target = resolve_target()?;

    if json {
        let mut value = serde_json::to_value(target)?;
        value["triple"] = serde_json::Value::String(target.triple());
        println!("{value}");
    } else {
        println!("{target}");
    }
    Ok(())
}

use std::path::Path;

use anyhow::bail;
use fhttp_model::ModelConfig;

pub fn init(path: &str) -> anyhow::Result<()> {
    let output = Path::new(path);
    if output.exists() {
        bail!("{} already exists", output.display());
    }

    let config = ModelConfig::scaffold();
    std::fs::write(output, config.to_toml_string()?)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_a_loadable_scaffold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fhttp.toml");
        let path_str = path.to_str().unwrap();

        init(path_str).unwrap();
        let loaded = ModelConfig::from_file(&path).unwrap();
        assert_eq!(loaded, ModelConfig::scaffold());

        assert!(init(path_str).is_err());
    }
}

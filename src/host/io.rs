//! Reading and writing element files.

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Reads the RON (Rusty Object Notation) file at the given path and
/// deserializes the contents into an object of type `T`.
pub fn parse_ron_file<T>(file_path: impl AsRef<Path>) -> Result<T>
where
    T: for<'de> serde::de::Deserialize<'de>,
{
    let file_path = file_path.as_ref();

    let text = fs::read_to_string(file_path)
        .with_context(|| format!("Could not open {}", file_path.display()))?;

    ron::from_str::<T>(&text)
        .map_err(anyhow::Error::from)
        .with_context(|| format!("Invalid syntax in {}", file_path.display()))
}

/// Serializes the given value of type `T` to RON and writes it to the given
/// path, creating parent directories as needed.
pub fn write_ron_file<T>(value: &T, output_file_path: impl AsRef<Path>) -> Result<()>
where
    T: serde::ser::Serialize,
{
    let output_file_path = output_file_path.as_ref();
    let text = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())?;
    if let Some(parent) = output_file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output_file_path, text)
        .with_context(|| format!("Could not write {}", output_file_path.display()))
}

#[cfg(test)]
mod test {
    use super::*;
    use keplerian_orbit::{ElementUpdate, OrbitalElements};

    #[test]
    fn elements_survive_a_trip_through_a_file() {
        let dir = std::env::temp_dir().join(format!("keplerian-orbit-io-{}", std::process::id()));
        let path = dir.join("nested").join("elements.ron");
        let elements = OrbitalElements::default()
            .with(ElementUpdate::SemiMajorAxis(7.5))
            .with(ElementUpdate::SampleCount(9));

        write_ron_file(&elements, &path).unwrap();
        let loaded: OrbitalElements = parse_ron_file(&path).unwrap();
        assert_eq!(loaded, elements);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = parse_ron_file::<OrbitalElements>("/nonexistent/elements.ron").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/elements.ron"));
    }
}

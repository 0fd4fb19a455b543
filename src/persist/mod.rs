//! Hand-off between the editor and the form that stores farm areas
//!
//! Stored areas arrive either as a bare array of `{lat, lng}` or as the
//! area record itself with a `coordenadas` field. Saving produces the same
//! record shape with the area rounded to two decimals.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{Hectares, Vertex};

/// Finalized polygon handed to the persistence layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavePayload {
    pub coordenadas: Vec<Vertex>,
    /// Hectares, two decimals
    pub area: f64,
}

impl SavePayload {
    pub fn new(coordenadas: Vec<Vertex>, area: Hectares) -> Self {
        Self {
            coordenadas,
            area: area.rounded(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} does not hold a valid polygon", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PolygonFile {
    Bare(Vec<Vertex>),
    Record { coordenadas: Vec<Vertex> },
}

/// Parse polygon JSON in either stored shape
pub fn parse_polygon(json: &str) -> Result<Vec<Vertex>, serde_json::Error> {
    let file: PolygonFile = serde_json::from_str(json)?;
    Ok(match file {
        PolygonFile::Bare(vertices) => vertices,
        PolygonFile::Record { coordenadas } => coordenadas,
    })
}

pub fn load_polygon(path: &Path) -> Result<Vec<Vertex>, PersistError> {
    let contents = std::fs::read_to_string(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_polygon(&contents).map_err(|source| PersistError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the payload as pretty JSON
pub fn write_payload(path: &Path, payload: &SavePayload) -> Result<(), PersistError> {
    let write_err = |source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, payload).map_err(|e| write_err(e.into()))?;
    writer.write_all(b"\n").map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn v(lat: f64, lng: f64) -> Vertex {
        Vertex::new(lat, lng).unwrap()
    }

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[{"lat": -12.1, "lng": -77.0}, {"lat": -12.2, "lng": -77.1}]"#;
        let vertices = parse_polygon(json).unwrap();
        assert_eq!(vertices, vec![v(-12.1, -77.0), v(-12.2, -77.1)]);
    }

    #[test]
    fn test_parse_area_record() {
        let json = r#"{
            "id": 14,
            "nombre": "Lote 3",
            "area": 4.5,
            "coordenadas": [
                {"lat": -12.1, "lng": -77.0},
                {"lat": -12.2, "lng": -77.1},
                {"lat": -12.2, "lng": -77.0}
            ]
        }"#;
        let vertices = parse_polygon(json).unwrap();
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[2], v(-12.2, -77.0));
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        let json = r#"[{"lat": -120.0, "lng": -77.0}]"#;
        assert!(parse_polygon(json).is_err());
    }

    #[test]
    fn test_payload_rounds_area() {
        let payload = SavePayload::new(vec![v(0.0, 0.0)], Hectares(12.3456));
        assert_eq!(payload.area, 12.35);
    }

    #[test]
    fn test_write_then_load_payload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lote.json");

        let ring = vec![v(-12.1, -77.0), v(-12.2, -77.1), v(-12.2, -77.0)];
        let payload = SavePayload::new(ring.clone(), Hectares(7.0));
        write_payload(&path, &payload).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"coordenadas\""));
        assert_eq!(load_polygon(&path).unwrap(), ring);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_polygon(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, PersistError::Read { .. }));
    }
}

//! Artifact persistence
//!
//! Loads the trained network and scaler artifacts once at process start and
//! validates their shapes before any classification runs. A missing or
//! invalid artifact is a fatal startup error; there is no retry. Save
//! counterparts exist for tooling and test fixtures.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::codebook::LABELS;
use crate::error::{ClassifierError, Result};
use crate::features::FEATURE_COUNT;
use crate::network::ClassifierNetwork;
use crate::scaler::ScalerParameters;

/// On-disk payload format version.
pub const FORMAT_VERSION: u32 = 1;

/// Header carried by every artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub format_version: u32,
    pub saved_at: DateTime<Utc>,
    /// Crate version that wrote the artifact.
    pub produced_by: String,
}

impl ArtifactMetadata {
    fn current() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            saved_at: Utc::now(),
            produced_by: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Serialized trained network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkArtifact {
    pub metadata: ArtifactMetadata,
    pub network: ClassifierNetwork,
}

/// Serialized fitted scaler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifact {
    pub metadata: ArtifactMetadata,
    pub scaler: ScalerParameters,
}

/// Load and validate the trained network artifact.
pub fn load_network(path: &Path) -> Result<NetworkArtifact> {
    let artifact: NetworkArtifact = read_artifact(path)?;
    check_version(path, artifact.metadata.format_version)?;

    artifact.network.validate()?;
    if artifact.network.input_width() != FEATURE_COUNT {
        return Err(ClassifierError::ArtifactCorrupt(format!(
            "network input width {} does not match the {}-feature encoding",
            artifact.network.input_width(),
            FEATURE_COUNT
        )));
    }
    if artifact.network.output_width() != LABELS.len() {
        return Err(ClassifierError::ArtifactCorrupt(format!(
            "network output width {} does not match the {}-label vocabulary",
            artifact.network.output_width(),
            LABELS.len()
        )));
    }

    info!(
        "Loaded classifier network from {} ({} layers, topology {:?})",
        path.display(),
        artifact.network.depth(),
        artifact.network.topology()
    );
    Ok(artifact)
}

/// Load and validate the fitted scaler artifact.
pub fn load_scaler(path: &Path) -> Result<ScalerArtifact> {
    let artifact: ScalerArtifact = read_artifact(path)?;
    check_version(path, artifact.metadata.format_version)?;

    if artifact.scaler.min().len() != artifact.scaler.max().len() {
        return Err(ClassifierError::ArtifactCorrupt(format!(
            "scaler has {} minimums but {} maximums",
            artifact.scaler.min().len(),
            artifact.scaler.max().len()
        )));
    }
    if artifact.scaler.feature_count() != FEATURE_COUNT {
        return Err(ClassifierError::ArtifactCorrupt(format!(
            "scaler fitted on {} features, expected {}",
            artifact.scaler.feature_count(),
            FEATURE_COUNT
        )));
    }

    info!(
        "Loaded scaler parameters from {} ({} features)",
        path.display(),
        artifact.scaler.feature_count()
    );
    Ok(artifact)
}

/// Write a network artifact with a fresh metadata header.
pub fn save_network(path: &Path, network: &ClassifierNetwork) -> Result<()> {
    network.validate()?;
    let artifact = NetworkArtifact {
        metadata: ArtifactMetadata::current(),
        network: network.clone(),
    };
    write_artifact(path, &artifact)
}

/// Write a scaler artifact with a fresh metadata header.
pub fn save_scaler(path: &Path, scaler: &ScalerParameters) -> Result<()> {
    let artifact = ScalerArtifact {
        metadata: ArtifactMetadata::current(),
        scaler: scaler.clone(),
    };
    write_artifact(path, &artifact)
}

fn read_artifact<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(ClassifierError::ArtifactNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    bincode::serde::decode_from_std_read(&mut reader, bincode::config::standard()).map_err(|e| {
        ClassifierError::ArtifactCorrupt(format!("{}: {}", path.display(), e))
    })
}

fn write_artifact<T: Serialize>(path: &Path, artifact: &T) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    bincode::serde::encode_into_std_write(artifact, &mut writer, bincode::config::standard())
        .map_err(|e| ClassifierError::ArtifactCorrupt(format!("{}: {}", path.display(), e)))?;
    Ok(())
}

fn check_version(path: &Path, version: u32) -> Result<()> {
    if version != FORMAT_VERSION {
        return Err(ClassifierError::ArtifactCorrupt(format!(
            "{}: unsupported format version {} (expected {})",
            path.display(),
            version,
            FORMAT_VERSION
        )));
    }
    Ok(())
}

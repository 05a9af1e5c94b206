//! Result download
//!
//! Saves the mask produced by a finished job. Outputs are scanned in order
//! and only the first file whose type is stored as `.mha` (MHD) is written;
//! later outputs are ignored.

use gcalgo_core::domain::job::JobOutput;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Result, RunError};
use crate::repository::AlgorithmRepository;

/// Extension of the mask file, also required on the destination path
pub const MASK_EXTENSION: &str = "mha";

/// Rejects destinations that do not end in `.mha`
pub fn ensure_mask_extension(path: &Path) -> Result<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(MASK_EXTENSION) => Ok(()),
        _ => Err(RunError::InvalidOutputExtension {
            path: path.display().to_string(),
            expected: MASK_EXTENSION,
        }),
    }
}

/// Downloads the first mask among `outputs` to `destination`
///
/// Parent directories are created as needed and an existing file is
/// overwritten.
///
/// # Returns
/// The written path, or `None` when no output carries a mask. The caller
/// decides whether the latter is an error.
pub async fn download_results(
    repository: &dyn AlgorithmRepository,
    outputs: &[JobOutput],
    destination: &Path,
) -> Result<Option<PathBuf>> {
    for output in outputs {
        let Some(image_url) = output.image.as_deref() else {
            continue;
        };

        let image = repository.get_image(image_url).await?;

        for file in &image.files {
            if file.image_type.extension() != Some(MASK_EXTENSION) {
                debug!("Skipping {} file of image {}", file.image_type, image.pk);
                continue;
            }

            ensure_mask_extension(destination)?;

            if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| io_error(parent, source))?;
            }

            let content = repository.fetch_bytes(&file.file).await?;
            tokio::fs::write(destination, &content)
                .await
                .map_err(|source| io_error(destination, source))?;

            info!(
                "Saved {} bytes of image {} to {}",
                content.len(),
                image.pk,
                destination.display()
            );

            return Ok(Some(destination.to_path_buf()));
        }
    }

    Ok(None)
}

fn io_error(path: &Path, source: std::io::Error) -> RunError {
    RunError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::testing::{FakeRepository, image};
    use gcalgo_core::domain::image::ImageType;
    use uuid::Uuid;

    const FIRST: &str = "http://gc/cases/images/first/";
    const SECOND: &str = "http://gc/cases/images/second/";

    fn outputs(images: &[Option<&str>]) -> Vec<JobOutput> {
        images
            .iter()
            .map(|image| JobOutput {
                image: image.map(str::to_string),
            })
            .collect()
    }

    #[test]
    fn test_extension_check() {
        assert!(ensure_mask_extension(Path::new("out/result.mha")).is_ok());
        assert!(ensure_mask_extension(Path::new("result.tar.mha")).is_ok());

        for bad in ["result.png", "result.MHA", "result", ".mha", "result.mhd"] {
            let err = ensure_mask_extension(Path::new(bad)).unwrap_err();
            assert!(err.is_configuration(), "{} should be rejected", bad);
        }
    }

    #[tokio::test]
    async fn test_writes_first_mhd_and_stops() {
        let repository = FakeRepository::new()
            .push_image(
                FIRST,
                Ok(image(
                    Uuid::new_v4(),
                    &[
                        (ImageType::Jpeg, "http://cdn/first.jpg"),
                        (ImageType::Mhd, "http://cdn/first.mha"),
                    ],
                )),
            )
            .push_image(
                SECOND,
                Ok(image(Uuid::new_v4(), &[(ImageType::Mhd, "http://cdn/second.mha")])),
            )
            .with_file("http://cdn/first.mha", b"first-mask")
            .with_file("http://cdn/second.mha", b"second-mask");

        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("mask.mha");

        let saved = download_results(
            &repository,
            &outputs(&[None, Some(FIRST), Some(SECOND)]),
            &destination,
        )
        .await
        .unwrap();

        assert_eq!(saved, Some(destination.clone()));
        assert_eq!(std::fs::read(&destination).unwrap(), b"first-mask");
        assert_eq!(repository.calls(), vec!["get_image", "fetch_bytes"]);
    }

    #[tokio::test]
    async fn test_moves_on_when_image_has_no_mask() {
        let repository = FakeRepository::new()
            .push_image(
                FIRST,
                Ok(image(Uuid::new_v4(), &[(ImageType::Tiff, "http://cdn/first.tif")])),
            )
            .push_image(
                SECOND,
                Ok(image(Uuid::new_v4(), &[(ImageType::Mhd, "http://cdn/second.mha")])),
            )
            .with_file("http://cdn/second.mha", b"second-mask");

        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("mask.mha");

        let saved = download_results(&repository, &outputs(&[Some(FIRST), Some(SECOND)]), &destination)
            .await
            .unwrap();

        assert!(saved.is_some());
        assert_eq!(std::fs::read(&destination).unwrap(), b"second-mask");
    }

    #[tokio::test]
    async fn test_creates_parents_and_overwrites() {
        let repository = FakeRepository::new()
            .push_image(
                FIRST,
                Ok(image(Uuid::new_v4(), &[(ImageType::Mhd, "http://cdn/first.mha")])),
            )
            .with_file("http://cdn/first.mha", b"new");

        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("a/b/c/mask.mha");
        std::fs::create_dir_all(destination.parent().unwrap()).unwrap();
        std::fs::write(&destination, b"old content that is longer").unwrap();

        download_results(&repository, &outputs(&[Some(FIRST)]), &destination)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&destination).unwrap(), b"new");

        let repository = FakeRepository::new()
            .push_image(
                FIRST,
                Ok(image(Uuid::new_v4(), &[(ImageType::Mhd, "http://cdn/first.mha")])),
            )
            .with_file("http://cdn/first.mha", b"fresh");
        let nested = dir.path().join("x/y/mask.mha");

        download_results(&repository, &outputs(&[Some(FIRST)]), &nested)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&nested).unwrap(), b"fresh");
    }

    #[tokio::test]
    async fn test_wrong_extension_touches_nothing() {
        let repository = FakeRepository::new()
            .push_image(
                FIRST,
                Ok(image(Uuid::new_v4(), &[(ImageType::Mhd, "http://cdn/first.mha")])),
            )
            .with_file("http://cdn/first.mha", b"mask");

        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("nested/result.png");

        let err = download_results(&repository, &outputs(&[Some(FIRST)]), &destination)
            .await
            .unwrap_err();

        assert!(matches!(err, RunError::InvalidOutputExtension { .. }));
        assert!(!dir.path().join("nested").exists());
        assert_eq!(repository.count("fetch_bytes"), 0);
    }

    #[tokio::test]
    async fn test_only_mhd_files_count_as_mask() {
        let repository = FakeRepository::new().push_image(
            FIRST,
            Ok(image(
                Uuid::new_v4(),
                &[
                    (ImageType::Tiff, "http://cdn/first.tif"),
                    (ImageType::Dzi, "http://cdn/first.dzi"),
                    (ImageType::Other("MHA".to_string()), "http://cdn/first.mha"),
                ],
            )),
        );

        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("mask.mha");

        let saved = download_results(&repository, &outputs(&[Some(FIRST)]), &destination)
            .await
            .unwrap();

        assert!(saved.is_none());
        assert_eq!(repository.count("fetch_bytes"), 0);
    }

    #[tokio::test]
    async fn test_no_mask_returns_none_without_writing() {
        let repository = FakeRepository::new().push_image(
            FIRST,
            Ok(image(Uuid::new_v4(), &[(ImageType::Jpeg, "http://cdn/first.jpg")])),
        );

        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("mask.mha");

        let saved = download_results(&repository, &outputs(&[None, Some(FIRST)]), &destination)
            .await
            .unwrap();

        assert!(saved.is_none());
        assert!(!destination.exists());
    }
}

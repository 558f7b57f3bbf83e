//! Render targets for an assembled document: streams, stdout and files

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info, instrument, trace};

use crate::config::Settings;
use crate::domain::DocumentBuilder;
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::xml::XmlWriter;

impl DocumentBuilder {
    /// Serialize the document to `out`.
    ///
    /// Rendering does not touch the document, so it may be repeated.
    #[instrument(level = "debug", skip_all)]
    pub fn render_to_stream<W: Write>(&self, out: W, settings: &Settings) -> InfraResult<()> {
        trace!("Document outline:\n{}", self.document().to_tree_string());
        XmlWriter::new(out, settings.indent, settings.xml_declaration)
            .write_document(self.document())
    }

    /// Serialize the document to the process's standard output.
    pub fn render_to_stdout(&self, settings: &Settings) -> InfraResult<()> {
        let stdout = io::stdout();
        self.render_to_stream(stdout.lock(), settings)
    }

    /// Serialize the document to `filename`, resolved against `settings.output_dir`.
    ///
    /// The document is written to a temporary file next to the target and then
    /// renamed over it, so a failed render never leaves a truncated file behind.
    /// An existing file is replaced and keeps its permissions; a new file gets
    /// the umask default, as with a plain create.
    ///
    /// Returns the path that was written.
    #[instrument(level = "debug", skip(self, settings))]
    pub fn render_to_file(&self, filename: &Path, settings: &Settings) -> InfraResult<PathBuf> {
        let target = settings.resolve_output(filename);
        let dir = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let temp = create_temp_file(dir, &target)?;
        debug!("Rendering into {}", temp.path().display());

        let mut writer = BufWriter::new(temp);
        self.render_to_stream(&mut writer, settings)?;
        let temp = writer.into_inner().map_err(|e| {
            InfraError::serialization(format!("flush {}", target.display()), e.into_error())
        })?;

        temp.persist(&target).map_err(|e| {
            InfraError::serialization(format!("write {}", target.display()), e.error)
        })?;

        info!(
            "Wrote {} subjects to {}",
            self.count_subjects(),
            target.display()
        );
        Ok(target)
    }
}

/// Temp file in `dir` whose mode matches what writing `target` directly would give.
fn create_temp_file(dir: &Path, target: &Path) -> InfraResult<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".mutxml");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Subject to the process umask, like File::create.
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let temp = builder.tempfile_in(dir).map_err(|e| {
        InfraError::serialization(format!("create temp file in {}", dir.display()), e)
    })?;

    if let Ok(metadata) = fs::metadata(target) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| {
                InfraError::serialization(
                    format!("copy permissions of {}", target.display()),
                    e,
                )
            })?;
    }
    Ok(temp)
}

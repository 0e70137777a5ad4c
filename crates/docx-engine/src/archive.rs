//! Staged rewrite of template archives
//!
//! A fill reads the template once, streams every entry into a staging file
//! (rewritten parts get their edited text, every other entry is copied raw),
//! then atomically renames the staging file to its final unique name. The
//! template itself is never opened for writing, and a failure at any step
//! leaves nothing behind in the destination directory.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info, warn};
use uuid::Uuid;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::errors::EngineError;
use crate::placeholder::PlaceholderTable;
use crate::xml;

/// One edit applied to the text of a part
#[derive(Debug, Clone)]
pub enum PartOp {
    /// Replace every match of `pattern`; `$n` groups are expanded
    Rewrite { pattern: Regex, replacement: String },
    /// Remove each innermost `<tag>` element containing `containing`
    DropElement { tag: String, containing: String },
    /// Simultaneous marker substitution
    Substitute(PlaceholderTable),
    /// Remove every match of the pattern
    Delete(Regex),
}

impl PartOp {
    pub fn rewrite(pattern: &str, replacement: impl Into<String>) -> Result<Self, EngineError> {
        Ok(PartOp::Rewrite {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }

    pub fn delete(pattern: &str) -> Result<Self, EngineError> {
        Ok(PartOp::Delete(Regex::new(pattern)?))
    }

    pub fn drop_element(tag: impl Into<String>, containing: impl Into<String>) -> Self {
        PartOp::DropElement {
            tag: tag.into(),
            containing: containing.into(),
        }
    }

    fn apply(&self, text: &str) -> Result<String, EngineError> {
        match self {
            PartOp::Rewrite {
                pattern,
                replacement,
            } => Ok(pattern.replace_all(text, replacement.as_str()).into_owned()),
            PartOp::DropElement { tag, containing } => {
                let (out, removed) = xml::drop_elements(text, tag, containing);
                debug!("Dropped {} <{}> element(s) containing '{}'", removed, tag, containing);
                Ok(out)
            }
            PartOp::Substitute(table) => table.apply(text),
            PartOp::Delete(pattern) => Ok(pattern.replace_all(text, "").into_owned()),
        }
    }
}

/// Ordered edits for one part of the archive
#[derive(Debug, Clone)]
pub struct PartEdit {
    pub part: String,
    pub ops: Vec<PartOp>,
}

impl PartEdit {
    /// Run every op in order against the part text
    pub fn apply(&self, text: &str) -> Result<String, EngineError> {
        let mut current = text.to_string();
        for op in &self.ops {
            current = op.apply(&current)?;
        }
        Ok(current)
    }

    /// Markers of this edit's tables still present in `text`
    fn unreplaced(&self, text: &str) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                PartOp::Substitute(table) => Some(table.unreplaced(text)),
                _ => None,
            })
            .flatten()
            .map(str::to_string)
            .collect()
    }
}

/// Edits for every part touched by one fill
#[derive(Debug, Clone, Default)]
pub struct FillPlan {
    edits: Vec<PartEdit>,
}

impl FillPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an op to `part`, keeping parts in first-use order
    pub fn push(&mut self, part: &str, op: PartOp) -> &mut Self {
        match self.edits.iter_mut().find(|e| e.part == part) {
            Some(edit) => edit.ops.push(op),
            None => self.edits.push(PartEdit {
                part: part.to_string(),
                ops: vec![op],
            }),
        }
        self
    }

    pub fn edits(&self) -> &[PartEdit] {
        &self.edits
    }

    pub fn edit_for(&self, part: &str) -> Option<&PartEdit> {
        self.edits.iter().find(|e| e.part == part)
    }

    /// Substitution table for `part`, if the plan has one
    pub fn table_for(&self, part: &str) -> Option<&PlaceholderTable> {
        self.edit_for(part)?.ops.iter().find_map(|op| match op {
            PartOp::Substitute(table) => Some(table),
            _ => None,
        })
    }
}

/// A freshly generated document
#[derive(Debug, Clone)]
pub struct FilledDocument {
    pub id: Uuid,
    pub path: PathBuf,
    pub parts_modified: usize,
    /// (part, marker) pairs that were still present after filling
    pub unreplaced: Vec<(String, String)>,
}

/// Fill `template` according to `plan`, writing `<uuid>.docx` into `dest_dir`
pub fn fill_template(
    template: &Path,
    dest_dir: &Path,
    plan: &FillPlan,
) -> Result<FilledDocument, EngineError> {
    let file = File::open(template).map_err(|e| EngineError::ArchiveOpen {
        path: template.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|e| EngineError::ArchiveOpen {
            path: template.to_path_buf(),
            reason: e.to_string(),
        })?;

    let present: HashSet<String> = archive.file_names().map(str::to_string).collect();
    if let Some(missing) = plan.edits().iter().find(|e| !present.contains(&e.part)) {
        return Err(EngineError::PartNotFound(missing.part.clone()));
    }

    // Dropped without persisting on any early return, which deletes it
    let mut staging = tempfile::Builder::new()
        .prefix(".staging-")
        .suffix(".docx")
        .tempfile_in(dest_dir)?;

    let mut unreplaced = Vec::new();
    let mut parts_modified = 0;
    {
        let mut writer = ZipWriter::new(staging.as_file_mut());

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let name = entry.name().to_string();

            let Some(edit) = plan.edit_for(&name) else {
                writer.raw_copy_file(entry)?;
                continue;
            };

            let mut text = String::new();
            entry.read_to_string(&mut text).map_err(|e| match e.kind() {
                std::io::ErrorKind::InvalidData => EngineError::PartEncoding(name.clone()),
                _ => EngineError::IoError(e),
            })?;
            drop(entry);

            let edited = edit.apply(&text)?;
            for marker in edit.unreplaced(&edited) {
                warn!("Marker '{}' left unreplaced in {}", marker, name);
                unreplaced.push((name.clone(), marker));
            }

            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
            writer.start_file(name.as_str(), options)?;
            writer.write_all(edited.as_bytes())?;
            parts_modified += 1;
            debug!("Rewrote part {} ({} -> {} bytes)", name, text.len(), edited.len());
        }

        writer.finish()?;
    }
    staging.as_file().sync_all()?;

    let id = Uuid::new_v4();
    let path = dest_dir.join(format!("{}.docx", id));
    staging.persist(&path).map_err(|e| EngineError::IoError(e.error))?;

    info!(
        "Generated {} from {} ({} part(s) rewritten)",
        path.display(),
        template.display(),
        parts_modified
    );

    Ok(FilledDocument {
        id,
        path,
        parts_modified,
        unreplaced,
    })
}

/// Read one part of an archive as text
pub fn read_part(archive_path: &Path, part: &str) -> Result<String, EngineError> {
    let file = File::open(archive_path).map_err(|e| EngineError::ArchiveOpen {
        path: archive_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|e| EngineError::ArchiveOpen {
            path: archive_path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut entry = archive.by_name(part).map_err(|e| match e {
        zip::result::ZipError::FileNotFound => EngineError::PartNotFound(part.to_string()),
        other => EngineError::Zip(other),
    })?;

    let mut text = String::new();
    entry.read_to_string(&mut text).map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidData => EngineError::PartEncoding(part.to_string()),
        _ => EngineError::IoError(e),
    })?;
    Ok(text)
}


#[cfg(test)]
mod tests {
    use super::test_support::build_archive;
    use super::*;
    use crate::{DOCUMENT_PART, HEADER_PART};
    use pretty_assertions::assert_eq;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0"?><Types><Default Extension="xml" ContentType="application/xml"/></Types>"#;
    const DOCUMENT: &str = r#"<w:document><w:body><w:p><w:r><w:t>cianombre celebrada por acctype</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>acc1nombre</w:t></w:r></w:p></w:tc></w:tr><w:tr><w:tc><w:p><w:r><w:t>acc2nombre</w:t></w:r></w:p></w:tc></w:tr></w:tbl></w:body></w:document>"#;
    const HEADER: &str = r#"<w:hdr><w:p><w:r><w:t>fechaheader - cianombre</w:t></w:r></w:p></w:hdr>"#;

    fn template_in(dir: &Path) -> PathBuf {
        let path = dir.join("modelo.docx");
        build_archive(
            &path,
            &[
                ("[Content_Types].xml", CONTENT_TYPES),
                (DOCUMENT_PART, DOCUMENT),
                (HEADER_PART, HEADER),
            ],
        );
        path
    }

    fn full_plan() -> FillPlan {
        let document: PlaceholderTable = [
            ("cianombre", "Smith & Co"),
            ("acctype", "accionistas"),
            ("acc1nombre", "Ana"),
            ("acc2nombre", "Luis"),
        ]
        .into_iter()
        .collect();
        let header: PlaceholderTable = [("fechaheader", "05 de marzo de 2024"), ("cianombre", "Smith & Co")]
            .into_iter()
            .collect();

        let mut plan = FillPlan::new();
        plan.push(DOCUMENT_PART, PartOp::Substitute(document))
            .push(HEADER_PART, PartOp::Substitute(header));
        plan
    }

    #[test]
    fn test_fill_rewrites_parts_and_keeps_others() {
        let dir = tempfile::tempdir().unwrap();
        let template = template_in(dir.path());
        let out_dir = tempfile::tempdir().unwrap();

        let filled = fill_template(&template, out_dir.path(), &full_plan()).unwrap();

        assert_eq!(filled.parts_modified, 2);
        assert!(filled.unreplaced.is_empty());
        let document = read_part(&filled.path, DOCUMENT_PART).unwrap();
        assert!(document.contains("Smith &amp; Co celebrada por accionistas"));
        assert!(document.contains("<w:t>Luis</w:t>"));
        let header = read_part(&filled.path, HEADER_PART).unwrap();
        assert_eq!(
            header,
            "<w:hdr><w:p><w:r><w:t>05 de marzo de 2024 - Smith &amp; Co</w:t></w:r></w:p></w:hdr>"
        );
        assert_eq!(read_part(&filled.path, "[Content_Types].xml").unwrap(), CONTENT_TYPES);
    }

    #[test]
    fn test_filled_parts_are_well_formed_and_marker_free() {
        let dir = tempfile::tempdir().unwrap();
        let template = template_in(dir.path());
        let plan = full_plan();

        let filled = fill_template(&template, dir.path(), &plan).unwrap();

        for edit in plan.edits() {
            let text = read_part(&filled.path, &edit.part).unwrap();
            assert!(xml::is_well_formed(&text), "{} is not well formed", edit.part);
            let table = plan.table_for(&edit.part).unwrap();
            assert!(table.unreplaced(&text).is_empty());
        }
    }

    #[test]
    fn test_template_is_not_modified() {
        let dir = tempfile::tempdir().unwrap();
        let template = template_in(dir.path());
        let before = std::fs::read(&template).unwrap();

        fill_template(&template, dir.path(), &full_plan()).unwrap();

        assert_eq!(std::fs::read(&template).unwrap(), before);
    }

    #[test]
    fn test_each_fill_gets_a_unique_name() {
        let dir = tempfile::tempdir().unwrap();
        let template = template_in(dir.path());
        let out_dir = tempfile::tempdir().unwrap();

        let a = fill_template(&template, out_dir.path(), &full_plan()).unwrap();
        let b = fill_template(&template, out_dir.path(), &full_plan()).unwrap();

        assert_ne!(a.path, b.path);
        assert!(a.path.exists());
        assert!(b.path.exists());
    }

    #[test]
    fn test_drop_then_substitute() {
        let dir = tempfile::tempdir().unwrap();
        let template = template_in(dir.path());

        let table: PlaceholderTable = [("acc1nombre", "Ana"), ("cianombre", "X"), ("acctype", "socios")]
            .into_iter()
            .collect();
        let mut plan = FillPlan::new();
        plan.push(DOCUMENT_PART, PartOp::drop_element("w:tr", "acc2nombre"))
            .push(DOCUMENT_PART, PartOp::Substitute(table));

        let filled = fill_template(&template, dir.path(), &plan).unwrap();
        let document = read_part(&filled.path, DOCUMENT_PART).unwrap();

        assert!(!document.contains("acc2nombre"));
        assert_eq!(document.matches("<w:tr>").count(), 1);
        assert!(xml::is_well_formed(&document));
    }

    #[test]
    fn test_rewrite_and_delete_ops() {
        let edit = PartEdit {
            part: DOCUMENT_PART.to_string(),
            ops: vec![
                PartOp::rewrite(r"(?s)<w:t>los cónyuges</w:t>.+?formada</w:t>", "<w:t>los cónyuges con1xx y con2xx</w:t>")
                    .unwrap(),
                PartOp::delete(r#"(?s)<w:p w:rsidQ="X".+?</w:p>"#).unwrap(),
            ],
        };
        let text = r#"<w:t>los cónyuges</w:t><w:t>que tienen formada</w:t><w:p w:rsidQ="X"><w:t>x</w:t></w:p>"#;
        assert_eq!(edit.apply(text).unwrap(), "<w:t>los cónyuges con1xx y con2xx</w:t>");
    }

    #[test]
    fn test_unreplaced_markers_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let template = template_in(dir.path());

        let table: PlaceholderTable = [("cianombre", "X"), ("acctype", "socios"), ("acc1nombre", "A"), ("acc2nombre", "B")]
            .into_iter()
            .collect();
        let mut plan = FillPlan::new();
        plan.push(DOCUMENT_PART, PartOp::Substitute(table))
            // A later rewrite reintroduces a marker
            .push(DOCUMENT_PART, PartOp::rewrite("socios", "acctype").unwrap());

        let filled = fill_template(&template, dir.path(), &plan).unwrap();
        assert_eq!(
            filled.unreplaced,
            vec![(DOCUMENT_PART.to_string(), "acctype".to_string())]
        );
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = fill_template(&dir.path().join("nope.docx"), dir.path(), &full_plan()).unwrap_err();
        assert!(matches!(err, EngineError::ArchiveOpen { .. }));
    }

    #[test]
    fn test_corrupt_template_is_an_error_and_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("broken.docx");
        std::fs::write(&template, b"not a zip archive").unwrap();
        let out_dir = tempfile::tempdir().unwrap();

        let err = fill_template(&template, out_dir.path(), &full_plan()).unwrap_err();

        assert!(matches!(err, EngineError::ArchiveOpen { .. }));
        assert_eq!(std::fs::read_dir(out_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_part_is_an_error_and_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("modelo.docx");
        build_archive(&template, &[(DOCUMENT_PART, DOCUMENT)]);
        let out_dir = tempfile::tempdir().unwrap();

        let err = fill_template(&template, out_dir.path(), &full_plan()).unwrap_err();

        assert!(matches!(err, EngineError::PartNotFound(ref p) if p == HEADER_PART));
        assert_eq!(std::fs::read_dir(out_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_plan_groups_ops_by_part() {
        let mut plan = FillPlan::new();
        plan.push(DOCUMENT_PART, PartOp::drop_element("w:p", "x"))
            .push(HEADER_PART, PartOp::Substitute(PlaceholderTable::new()))
            .push(DOCUMENT_PART, PartOp::Substitute(PlaceholderTable::new()));

        assert_eq!(plan.edits().len(), 2);
        assert_eq!(plan.edits()[0].part, DOCUMENT_PART);
        assert_eq!(plan.edits()[0].ops.len(), 2);
        assert!(plan.table_for(HEADER_PART).is_some());
    }
}

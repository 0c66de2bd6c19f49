use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Name of the single JSON entry inside a `.gmind` container.
pub const CONTENT_ENTRY: &str = "content.json";

pub const TREE_SUFFIX: &str = "_tree.json";
pub const DEPENDENCE_SUFFIX: &str = "_dependence.json";
pub const GMIND_EXTENSION: &str = ".gmind";

/// `foo_tree.json` -> `foo.gmind`, kept in `out_dir`.
pub fn gmind_path_for(tree_file: &Path, out_dir: &Path) -> Option<PathBuf> {
    let name = tree_file.file_name()?.to_str()?;
    let stem = name.strip_suffix(TREE_SUFFIX)?;
    Some(out_dir.join(format!("{stem}{GMIND_EXTENSION}")))
}

/// `foo_dependence.json` -> `foo_tree.json`, kept in `out_dir`.
pub fn tree_path_for(dependence_file: &Path, out_dir: &Path) -> Option<PathBuf> {
    let name = dependence_file.file_name()?.to_str()?;
    let stem = name.strip_suffix(DEPENDENCE_SUFFIX)?;
    Some(out_dir.join(format!("{stem}{TREE_SUFFIX}")))
}

/// Root label derived from a file name: everything before the first `_`.
pub fn root_name_for(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    name.split('_').next().map(str::to_string)
}

/// Decodes JSON without serde_json's nesting limit, growing the stack on
/// demand so deeply nested tree structures read back like shallow ones.
pub fn from_json_str<T: DeserializeOwned>(contents: &str) -> Result<T> {
    let mut de = serde_json::Deserializer::from_str(contents);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

pub fn read_json_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    from_json_str(&std::fs::read_to_string(path)?)
}

#[cfg(feature = "gmind")]
fn write_json<W: Write>(writer: W, value: &impl Serialize) -> Result<()> {
    let mut ser = serde_json::Serializer::new(writer);
    value.serialize(serde_stacker::Serializer::new(&mut ser))?;
    Ok(())
}

fn write_json_pretty<W: Write>(writer: W, value: &impl Serialize) -> Result<()> {
    let mut ser = serde_json::Serializer::pretty(writer);
    value.serialize(serde_stacker::Serializer::new(&mut ser))?;
    Ok(())
}

#[cfg(feature = "gmind")]
mod container {
    use std::io::{Cursor, Read, Seek, Write};
    use std::path::Path;

    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipArchive, ZipWriter};

    use super::{CONTENT_ENTRY, from_json_str, write_json};
    use crate::document::GitMindDocument;
    use crate::error::{DepmindError, Result};

    fn package_err(err: zip::result::ZipError) -> DepmindError {
        DepmindError::Package(err.to_string())
    }

    pub fn write_container<W: Write + Seek>(writer: W, doc: &GitMindDocument) -> Result<W> {
        let mut payload = Vec::new();
        write_json(&mut payload, doc)?;
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        zip.start_file(CONTENT_ENTRY, options).map_err(package_err)?;
        zip.write_all(&payload)?;
        zip.finish().map_err(package_err)
    }

    pub fn read_container<R: Read + Seek>(reader: R) -> Result<GitMindDocument> {
        let mut archive = ZipArchive::new(reader).map_err(package_err)?;
        let mut entry = archive.by_name(CONTENT_ENTRY).map_err(package_err)?;
        let mut contents = String::new();
        entry.read_to_string(&mut contents)?;
        from_json_str(&contents)
    }

    /// The container as an in-memory buffer.
    pub fn gmind_bytes(doc: &GitMindDocument) -> Result<Vec<u8>> {
        Ok(write_container(Cursor::new(Vec::new()), doc)?.into_inner())
    }

    pub fn write_gmind(path: &Path, doc: &GitMindDocument) -> Result<()> {
        std::fs::write(path, gmind_bytes(doc)?)?;
        Ok(())
    }

    pub fn read_gmind(path: &Path) -> Result<GitMindDocument> {
        read_container(std::fs::File::open(path)?)
    }
}

#[cfg(feature = "gmind")]
pub use container::{gmind_bytes, read_container, read_gmind, write_container, write_gmind};

#[cfg(not(feature = "gmind"))]
pub fn write_gmind(_path: &Path, _doc: &crate::document::GitMindDocument) -> Result<()> {
    Err(crate::error::DepmindError::Package(
        "built without the `gmind` feature".to_string(),
    ))
}

pub fn write_tree_document(path: &Path, doc: &impl Serialize) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    write_json_pretty(&mut writer, doc)?;
    writer.flush()?;
    Ok(())
}

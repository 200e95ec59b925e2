use crate::core::{Letter, LetterSink};
use crate::utils::error::Result;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Letters file opened once for the whole session.
#[derive(Debug)]
pub struct FileLetterSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileLetterSink {
    /// Truncates an existing file unless `append` is set.
    pub fn open<P: AsRef<Path>>(path: P, append: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(&path)?;

        tracing::debug!("Letters file opened: {} (append: {})", path.display(), append);
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LetterSink for FileLetterSink {
    fn write_letter(&mut self, letter: &Letter) -> Result<()> {
        write!(self.writer, "{}", letter)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn letter(recipient: &str, meal: &str) -> Letter {
        Letter {
            recipient: recipient.to_string(),
            meal: meal.to_string(),
            organization: "Test Kitchen".to_string(),
        }
    }

    #[test]
    fn test_letters_are_appended_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("letters.txt");

        let mut sink = FileLetterSink::open(&path, false).unwrap();
        sink.write_letter(&letter("Bo Kim", "Soup")).unwrap();
        sink.write_letter(&letter("Ann Lee", "Pizza")).unwrap();
        sink.flush().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let expected = format!("{}{}", letter("Bo Kim", "Soup"), letter("Ann Lee", "Pizza"));
        assert_eq!(content, expected);
    }

    #[test]
    fn test_truncate_versus_append() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("letters.txt");
        fs::write(&path, "old letter\n").unwrap();

        let mut sink = FileLetterSink::open(&path, true).unwrap();
        sink.write_letter(&letter("Bo Kim", "Soup")).unwrap();
        sink.flush().unwrap();
        drop(sink);
        assert!(fs::read_to_string(&path).unwrap().starts_with("old letter\nDear Bo Kim,"));

        let mut sink = FileLetterSink::open(&path, false).unwrap();
        sink.flush().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }
}

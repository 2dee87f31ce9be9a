use lockfile::Lockfile;

use std::fs::OpenOptions;
use std::path::Path;

use crate::entity::line::{Line, Liner};
use crate::error::CliError;
use crate::{config, CliResult, Mode};

/// CSV file holding one kind of record.
///
/// Each access locks the file, works on a temporary copy and writes the copy back once the
/// action succeeded.
pub struct Resource {
    pub kind: Line,
    pub filepath: String,
    pub tempfile: tempfile::NamedTempFile,
}

impl Resource {
    pub fn new(config: &config::Config, mode: Mode) -> CliResult<Resource> {
        let resource = Resource {
            filepath: config.filepath(mode),
            tempfile: tempfile::Builder::new().suffix(".csv").tempfile()?,
            kind: Line::default(mode),
        };

        if !Path::new(&resource.filepath).exists() {
            log::debug!("Creating missing file {}", resource.filepath);
            resource.create()?;
        }

        Ok(resource)
    }

    pub fn create(&self) -> CliResult<()> {
        let mut wtr = csv::WriterBuilder::new().from_path(self.tempfile.path())?;

        wtr.write_record(self.kind.headers())?;

        wtr.flush()?;

        self.close()?;

        Ok(())
    }

    pub fn line<F>(&self, action: &mut F) -> CliResult<()>
    where
        F: FnMut(Line) -> CliResult<()>,
    {
        self.apply(|file| {
            let mut rdr = csv::Reader::from_path(file.path())?;

            match self.kind {
                Line::Expense(_) => {
                    for result in rdr.deserialize() {
                        action(Line::Expense(result?))?;
                    }
                }
                Line::Budget(_) => {
                    for result in rdr.deserialize() {
                        action(Line::Budget(result?))?;
                    }
                }
            };

            Ok(())
        })
    }

    pub fn lines(&self) -> CliResult<Vec<Line>> {
        let mut lines = Vec::new();

        self.line(&mut |record| {
            lines.push(record);
            Ok(())
        })?;

        Ok(lines)
    }

    pub fn apply<F>(&self, action: F) -> CliResult<()>
    where
        F: FnOnce(&tempfile::NamedTempFile) -> CliResult<()>,
    {
        let lock = self.lock()?;

        self.open()?;

        action(&self.tempfile)?;

        self.close()?;

        lock.release()?;

        Ok(())
    }

    pub fn book(&self, lines: &[Line]) -> CliResult<()> {
        self.apply(|file| {
            let afile = OpenOptions::new().append(true).open(file.path())?;
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(afile);

            for line in lines {
                line.write(&mut wtr)?;
            }

            wtr.flush()?;

            Ok(())
        })
    }

    /// Replaces the whole content of the file by `lines`.
    pub fn rewrite(&self, lines: &[Line]) -> CliResult<()> {
        self.apply(|file| {
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_path(file.path())?;

            wtr.write_record(self.kind.headers())?;

            for line in lines {
                line.write(&mut wtr)?;
            }

            wtr.flush()?;

            Ok(())
        })
    }

    fn open(&self) -> CliResult<()> {
        std::fs::copy(&self.filepath, self.tempfile.path())?;

        Ok(())
    }

    fn close(&self) -> CliResult<()> {
        std::fs::copy(self.tempfile.path(), &self.filepath)?;

        Ok(())
    }

    fn lock(&self) -> CliResult<Lockfile> {
        Lockfile::create(format!("{}.lock", self.filepath)).map_err(|_| CliError::LockNotAcquired {
            filepath: self.filepath.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::tests::isolated;
    use crate::entity::budget::Budget;
    use crate::entity::date::Month;
    use crate::entity::money::{Amount, Currency};

    fn budget(month: &str, cents: i64) -> Line {
        Budget {
            month: Month::parse(month).unwrap(),
            amount: Amount::new(cents),
            currency: Currency::EUR,
        }
        .into()
    }

    #[test]
    fn missing_file_is_created_with_headers() {
        let dir = tempfile::tempdir().unwrap();
        let config = isolated(dir.path());

        let resource = Resource::new(&config, Mode::Expenses).unwrap();

        let content = std::fs::read_to_string(&resource.filepath).unwrap();
        assert_eq!(content.trim(), "Id,Date,Amount,Category,Note");
        assert!(resource.lines().unwrap().is_empty());
    }

    #[test]
    fn book_appends_and_rewrite_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let config = isolated(dir.path());
        let resource = Resource::new(&config, Mode::Budgets).unwrap();

        resource.book(&[budget("2024-01", 100)]).unwrap();
        resource.book(&[budget("2024-02", 200)]).unwrap();
        assert_eq!(resource.lines().unwrap().len(), 2);

        resource.rewrite(&[budget("2024-03", 300)]).unwrap();
        assert_eq!(resource.lines().unwrap(), vec![budget("2024-03", 300)]);
    }

    #[test]
    fn lock_is_released_after_each_operation() {
        let dir = tempfile::tempdir().unwrap();
        let config = isolated(dir.path());
        let resource = Resource::new(&config, Mode::Budgets).unwrap();

        resource.book(&[budget("2024-01", 100)]).unwrap();

        assert!(!Path::new(&format!("{}.lock", resource.filepath)).exists());
    }

    #[test]
    fn held_lock_rejects_access() {
        let dir = tempfile::tempdir().unwrap();
        let config = isolated(dir.path());
        let resource = Resource::new(&config, Mode::Budgets).unwrap();

        let _held = Lockfile::create(format!("{}.lock", resource.filepath)).unwrap();

        assert!(matches!(
            resource.lines(),
            Err(CliError::LockNotAcquired { .. })
        ));
    }
}

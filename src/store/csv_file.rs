use super::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::record::{self, PresenceRecord, RecordId, sort_newest_first};
use chrono::{NaiveDate, NaiveTime};
use csv::{ByteRecord, ReaderBuilder, StringRecord, WriterBuilder};
use fs4::fs_std::FileExt;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Flat tabular backend: a CSV file whose first row holds the configured
/// headers and every further row one record, columns in header order
/// (date, time, response, observation, area).
///
/// Writers hold an exclusive lock on a sidecar `<file>.lock`, readers a
/// shared one, so two processes never interleave writes on the same ledger.
pub struct CsvStore {
    path: PathBuf,
    lock_path: PathBuf,
    headers: Vec<String>,
}

enum LockMode {
    Shared,
    Exclusive,
}

impl CsvStore {
    /// Open the ledger at `path`, creating it with a header row if missing.
    pub fn open(path: &Path, headers: &[String]) -> AppResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut lock_name = path.as_os_str().to_owned();
        lock_name.push(".lock");

        let store = Self {
            path: path.to_path_buf(),
            lock_path: PathBuf::from(lock_name),
            headers: headers.to_vec(),
        };

        let _guard = store.lock(LockMode::Exclusive)?;
        store.ensure_file()?;
        store.sync_headers()?;
        Ok(store)
    }

    /// The lock is released when the returned handle is dropped.
    fn lock(&self, mode: LockMode) -> AppResult<File> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&self.lock_path)?;

        match mode {
            LockMode::Shared => FileExt::lock_shared(&file)?,
            LockMode::Exclusive => FileExt::lock_exclusive(&file)?,
        }
        Ok(file)
    }

    fn ensure_file(&self) -> AppResult<()> {
        let empty = match fs::metadata(&self.path) {
            Ok(m) => m.len() == 0,
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        if empty {
            let mut wtr = WriterBuilder::new().from_path(&self.path)?;
            wtr.write_record(&self.headers)?;
            wtr.flush()?;
            debug!(path = %self.path.display(), "ledger file created");
        }
        Ok(())
    }

    /// Rewrite the header row when the configured headers changed since the
    /// file was created. Data rows are carried over untouched.
    fn sync_headers(&self) -> AppResult<()> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;

        let mut rows = rdr.byte_records();
        let current = match rows.next() {
            Some(first) => first?,
            None => return Ok(()),
        };
        if current.iter().eq(self.headers.iter().map(|h| h.as_bytes())) {
            return Ok(());
        }

        let data: Vec<ByteRecord> = rows.collect::<Result<_, _>>()?;
        drop(rdr);
        self.replace_file(|file| {
            let mut wtr = WriterBuilder::new().flexible(true).from_writer(file);
            wtr.write_record(&self.headers)?;
            for row in &data {
                wtr.write_byte_record(row)?;
            }
            wtr.flush()?;
            Ok(())
        })?;

        info!(path = %self.path.display(), "ledger header row updated");
        Ok(())
    }

    /// Number of data rows, without decoding them.
    fn count_rows(&self) -> AppResult<usize> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let mut n = 0;
        for row in rdr.byte_records() {
            row?;
            n += 1;
        }
        Ok(n)
    }

    /// Build the new content in a temporary sibling and rename it over the
    /// ledger. The ledger keeps its permissions; on any failure it is left
    /// exactly as it was.
    fn replace_file<F>(&self, fill: F) -> AppResult<()>
    where
        F: FnOnce(&mut File) -> AppResult<()>,
    {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        fill(tmp.as_file_mut())?;
        tmp.as_file().sync_all()?;

        let perms = fs::metadata(&self.path)?.permissions();
        tmp.as_file().set_permissions(perms)?;

        tmp.persist(&self.path).map_err(|e| {
            AppError::Storage(format!("could not replace {}: {}", self.path.display(), e.error))
        })?;
        Ok(())
    }

    /// Records in file order (oldest write first).
    fn read_rows(&self) -> AppResult<Vec<PresenceRecord>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let mut out = Vec::new();
        for (i, row) in rdr.records().enumerate() {
            // +2: header row, 1-based lines
            out.push(row_to_record(i + 2, &row?)?);
        }
        Ok(out)
    }

    fn write_rows<W: Write>(dest: W, records: &[&PresenceRecord]) -> AppResult<()> {
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(dest);
        for rec in records {
            wtr.write_record([
                rec.date_str(),
                rec.time_str(),
                rec.response.clone(),
                rec.observation.clone(),
                rec.area.clone(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

fn row_to_record(line: usize, row: &StringRecord) -> AppResult<PresenceRecord> {
    let field = |i: usize| row.get(i).unwrap_or("").to_string();

    let date_str = field(0);
    let time_str = field(1);

    let date = record::parse_date(&date_str).ok_or_else(|| {
        AppError::Decode(format!("ledger line {line}: invalid date '{date_str}'"))
    })?;
    let time = record::parse_time(&time_str).ok_or_else(|| {
        AppError::Decode(format!("ledger line {line}: invalid time '{time_str}'"))
    })?;

    Ok(PresenceRecord {
        date,
        time,
        response: field(2),
        observation: field(3),
        area: field(4),
    })
}

/// Make sure the next appended row starts on its own line.
fn terminate_last_line(file: &mut File) -> io::Result<()> {
    let len = file.seek(SeekFrom::End(0))?;
    if len == 0 {
        return Ok(());
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    file.seek(SeekFrom::End(0))?;
    if last[0] != b'\n' {
        file.write_all(b"\n")?;
    }
    Ok(())
}

impl RecordStore for CsvStore {
    fn append(&mut self, record: &PresenceRecord) -> AppResult<RecordId> {
        let _guard = self.lock(LockMode::Exclusive)?;
        self.ensure_file()?;

        let id = self.count_rows()? as RecordId + 1;

        let mut file = OpenOptions::new().read(true).append(true).open(&self.path)?;
        terminate_last_line(&mut file)?;
        Self::write_rows(&mut file, &[record])?;
        file.sync_all()?;

        debug!(id, date = %record.date_str(), "record appended");
        Ok(id)
    }

    fn list_all(&self) -> AppResult<Vec<PresenceRecord>> {
        let _guard = self.lock(LockMode::Shared)?;
        let mut rows = self.read_rows()?;
        sort_newest_first(&mut rows);
        Ok(rows)
    }

    fn exists(&self, date: NaiveDate, time: NaiveTime) -> AppResult<bool> {
        let _guard = self.lock(LockMode::Shared)?;
        Ok(self.read_rows()?.iter().any(|r| r.key() == (date, time)))
    }

    /// The new file is assembled next to the ledger and renamed over it,
    /// so any failure leaves the original bytes untouched.
    fn import_batch(&mut self, records: &[PresenceRecord]) -> AppResult<usize> {
        let _guard = self.lock(LockMode::Exclusive)?;
        self.ensure_file()?;

        let mut seen: HashSet<(NaiveDate, NaiveTime)> =
            self.read_rows()?.iter().map(PresenceRecord::key).collect();

        let fresh: Vec<&PresenceRecord> = records.iter().filter(|r| seen.insert(r.key())).collect();

        if fresh.is_empty() {
            info!(total = records.len(), "import: nothing new");
            return Ok(0);
        }

        self.replace_file(|file| {
            let mut original = File::open(&self.path)?;
            io::copy(&mut original, file)?;
            terminate_last_line(file)?;
            Self::write_rows(file, &fresh)
        })?;

        info!(inserted = fresh.len(), total = records.len(), "import committed");
        Ok(fresh.len())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

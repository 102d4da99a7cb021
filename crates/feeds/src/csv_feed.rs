use std::collections::VecDeque;
use std::fs::File;
use std::path::PathBuf;

use zerophase_core::{Observation, SeriesFormat, Timestamp};
use zerophase_ports::{FeedError, FeedResult, ObservationFeed};

/// Open CSV file with resolved column positions
struct OpenSource {
    source_name: String,
    records: csv::StringRecordsIntoIter<File>,
    index_column: usize,
    value_column: usize,
}

/// Reads observations from an ordered list of headed CSV files
///
/// Files are opened lazily, one after another; the concatenation must be
/// strictly chronological.
pub struct CsvFeed {
    pending: VecDeque<PathBuf>,
    format: SeriesFormat,
    current: Option<OpenSource>,
    last_timestamp: Option<Timestamp>,
    failed: bool,
}

impl CsvFeed {
    pub fn new(paths: impl IntoIterator<Item = impl Into<PathBuf>>, format: SeriesFormat) -> Self {
        Self {
            pending: paths.into_iter().map(Into::into).collect(),
            format,
            current: None,
            last_timestamp: None,
            failed: false,
        }
    }

    pub fn format(&self) -> &SeriesFormat {
        &self.format
    }

    fn open(&self, path: PathBuf) -> FeedResult<OpenSource> {
        let source_name = path.display().to_string();
        let io_error = |e: csv::Error| FeedError::Io {
            source_name: source_name.clone(),
            message: e.to_string(),
        };

        let mut reader = csv::Reader::from_path(&path).map_err(io_error)?;
        let headers = reader.headers().map_err(io_error)?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| FeedError::MissingColumn {
                    source_name: source_name.clone(),
                    column: name.to_string(),
                })
        };
        let index_column = column(&self.format.index_field)?;
        let value_column = column(&self.format.value_field)?;

        log::debug!("Opened {} (index col {}, value col {})", source_name, index_column, value_column);
        Ok(OpenSource {
            records: reader.into_records(),
            source_name,
            index_column,
            value_column,
        })
    }

    fn parse(&self, source: &OpenSource, record: &csv::StringRecord) -> FeedResult<Observation> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let field = |column: usize| record.get(column).unwrap_or("").trim();

        let raw_ts = field(source.index_column);
        let timestamp =
            self.format
                .parse_timestamp(raw_ts)
                .ok_or_else(|| FeedError::InvalidTimestamp {
                    source_name: source.source_name.clone(),
                    line,
                    raw: raw_ts.to_string(),
                })?;

        let raw_value = field(source.value_column);
        let value = raw_value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| FeedError::InvalidValue {
                source_name: source.source_name.clone(),
                line,
                raw: raw_value.to_string(),
            })?;

        if self.last_timestamp.is_some_and(|last| timestamp <= last) {
            return Err(FeedError::OutOfOrder {
                source_name: source.source_name.clone(),
                line,
            });
        }

        log::trace!("{} line {}: {} -> {}", source.source_name, line, raw_ts, value);
        Ok(Observation::new(timestamp, value))
    }

    fn fail(&mut self, error: FeedError) -> Option<FeedResult<Observation>> {
        self.failed = true;
        self.current = None;
        Some(Err(error))
    }
}

impl ObservationFeed for CsvFeed {
    fn next_observation(&mut self) -> Option<FeedResult<Observation>> {
        if self.failed {
            return None;
        }

        loop {
            if self.current.is_none() {
                let path = self.pending.pop_front()?;
                match self.open(path) {
                    Ok(source) => self.current = Some(source),
                    Err(e) => return self.fail(e),
                }
            }

            let source = self.current.as_mut()?;
            let next = source.records.next();
            match next {
                None => {
                    self.current = None;
                }
                Some(Err(e)) => {
                    let error = FeedError::Io {
                        source_name: source.source_name.clone(),
                        message: e.to_string(),
                    };
                    return self.fail(error);
                }
                Some(Ok(record)) => {
                    let parsed = self
                        .current
                        .as_ref()
                        .map(|source| self.parse(source, &record))?;
                    return match parsed {
                        Ok(observation) => {
                            self.last_timestamp = Some(observation.timestamp);
                            Some(Ok(observation))
                        }
                        Err(e) => self.fail(e),
                    };
                }
            }
        }
    }

    fn name(&self) -> &str {
        "CsvFeed"
    }
}

//! Executor for running solvers one day at a time

use crate::cache::InputCache;
use crate::config::Config;
use crate::error::{ArcExecutorError, CliError, ExecutorError};
use aoc_http_client::AocClient;
use aoc_solver::{SolverError, SolverRegistry};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use zeroize::Zeroizing;

/// Hour (UTC) at which puzzles unlock: midnight US-Eastern
const UNLOCK_HOUR_UTC: u32 = 5;

/// Result from a single part execution
#[derive(Debug, Clone)]
pub struct PartResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub title: &'static str,
    pub answer: Result<String, ArcExecutorError>,
    /// Time spent parsing the day's input; `None` if parsing never finished
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: Option<TimeDelta>,
}

impl PartResult {
    fn failed(work: &WorkItem, part: u8, error: ArcExecutorError) -> Self {
        Self {
            year: work.year,
            day: work.day,
            part,
            title: work.title,
            answer: Err(error),
            parse_duration: None,
            solve_duration: None,
        }
    }
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub title: &'static str,
    pub parts: RangeInclusive<u8>,
}

/// When the puzzle for `year`/`day` becomes available
pub fn unlock_time(year: u16, day: u8) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(i32::from(year), 12, u32::from(day), UNLOCK_HOUR_UTC, 0, 0)
        .single()
}

/// Runs registered solvers against resolved inputs
pub struct Executor {
    registry: SolverRegistry,
    cache_dir: PathBuf,
    cache: Option<InputCache>,
    client: Option<AocClient>,
    session: Zeroizing<String>,
    input_file: Option<PathBuf>,
    year: u16,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, CliError> {
        let client = if config.session.is_empty() {
            None
        } else {
            Some(AocClient::new()?)
        };

        Ok(Self {
            registry,
            cache_dir: config.cache_dir.clone(),
            cache: config
                .user_id
                .map(|uid| InputCache::new(config.cache_dir.clone(), uid)),
            client,
            session: config.session.clone(),
            input_file: config.input_file.clone(),
            year: config.year,
            day_filter: config.day_filter,
            part_filter: config.part_filter,
        })
    }

    /// Replace the session, e.g. after prompting for one, and re-key the cache
    pub fn update_session(
        &mut self,
        session: Zeroizing<String>,
        user_id: u64,
    ) -> Result<(), CliError> {
        if self.client.is_none() {
            self.client = Some(AocClient::new()?);
        }
        self.session = session;
        self.cache = Some(InputCache::new(self.cache_dir.clone(), user_id));
        Ok(())
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        self.registry
            .storage()
            .iter_info()
            .filter(|info| info.year == self.year)
            .filter(|info| self.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                title: info.title,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Filter parts based on the part filter and the solver's max parts
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0,
            None => 1..=max_parts,
        }
    }

    /// Unlocked days whose input would have to be downloaded
    pub fn missing_inputs(&self, work_items: &[WorkItem], now: DateTime<Utc>) -> Vec<(u16, u8)> {
        if self.input_file.is_some() {
            return Vec::new();
        }
        work_items
            .iter()
            .filter(|w| unlock_time(w.year, w.day).is_some_and(|t| t <= now))
            .filter(|w| !self.cache.as_ref().is_some_and(|c| c.contains(w.year, w.day)))
            .map(|w| (w.year, w.day))
            .collect()
    }

    /// Whether downloads are possible with the current session
    pub fn has_session(&self) -> bool {
        !self.session.is_empty()
    }

    /// Execute all work items in order, handing each part's result to `report`
    ///
    /// Returns the combined errors of days that could not be run at all
    /// (input unavailable or unparsable). Those days still report a failed
    /// result for every requested part.
    pub fn execute(&self, report: impl FnMut(PartResult)) -> Result<(), ArcExecutorError> {
        self.execute_at(Utc::now(), report)
    }

    fn execute_at(
        &self,
        now: DateTime<Utc>,
        mut report: impl FnMut(PartResult),
    ) -> Result<(), ArcExecutorError> {
        let mut collected_error: Option<ArcExecutorError> = None;
        for work in self.collect_work_items() {
            if let Err(e) = self.run_solver(&work, now, &mut report) {
                log::debug!("{}/{:02} failed: {e}", work.year, work.day);
                for part in work.parts.clone() {
                    report(PartResult::failed(&work, part, e.clone()));
                }
                collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
            }
        }
        collected_error.map_or(Ok(()), Err)
    }

    /// Parse once and solve the requested parts in order
    fn run_solver(
        &self,
        work: &WorkItem,
        now: DateTime<Utc>,
        report: &mut impl FnMut(PartResult),
    ) -> Result<(), ArcExecutorError> {
        let input = self.get_input(work.year, work.day, now)?;
        let mut solver = self
            .registry
            .create_solver(work.year, work.day, input.trim())
            .map_err(ExecutorError::from)?;
        let parse_duration = solver.parse_duration();

        for part in work.parts.clone() {
            let result = match solver.solve(part) {
                Ok(solved) => PartResult {
                    year: work.year,
                    day: work.day,
                    part,
                    title: work.title,
                    solve_duration: Some(solved.duration()),
                    answer: Ok(solved.answer),
                    parse_duration: Some(parse_duration),
                },
                Err(e) => PartResult {
                    parse_duration: Some(parse_duration),
                    ..PartResult::failed(
                        work,
                        part,
                        ExecutorError::from(SolverError::from(e)).into(),
                    )
                },
            };
            report(result);
        }
        Ok(())
    }

    /// Get input from the local file, the cache, or a download
    fn get_input(&self, year: u16, day: u8, now: DateTime<Utc>) -> Result<String, ExecutorError> {
        if let Some(path) = &self.input_file {
            return std::fs::read_to_string(path).map_err(|source| ExecutorError::InputFile {
                path: path.clone(),
                source,
            });
        }

        if let Some(cache) = &self.cache
            && let Some(input) = cache.get(year, day).map_err(|e| ExecutorError::InputFetch {
                year,
                day,
                source: Box::new(e),
            })?
        {
            return Ok(input);
        }

        if let Some(unlocks_at) = unlock_time(year, day)
            && now < unlocks_at
        {
            return Err(ExecutorError::NotYetUnlocked {
                year,
                day,
                unlocks_at,
            });
        }

        let client = match &self.client {
            Some(client) if self.has_session() => client,
            _ => return Err(ExecutorError::MissingSession { year, day }),
        };

        log::info!("downloading input for {year}/{day:02}");
        let input = client
            .get_input(year, day, &self.session)
            .map_err(|e| ExecutorError::InputFetch {
                year,
                day,
                source: Box::new(e),
            })?;

        if let Some(cache) = &self.cache
            && let Err(source) = cache.put(year, day, &input)
        {
            log::warn!("{}", ExecutorError::CacheWrite { year, day, source });
        }

        Ok(input)
    }
}

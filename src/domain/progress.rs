use log::info;

/// Tracks how a participation run is going across the roster
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrapeProgress {
    total: usize,
    scraped: usize,
    failed: usize,
    appended: usize,
    skipped_known: usize,
}

impl ScrapeProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record_scraped(&mut self, appended: usize, skipped_known: usize) {
        self.scraped += 1;
        self.appended += appended;
        self.skipped_known += skipped_known;
        self.log_progress();
    }

    pub fn record_failed(&mut self) {
        self.failed += 1;
        self.log_progress();
    }

    pub fn current_count(&self) -> usize {
        self.scraped + self.failed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn appended(&self) -> usize {
        self.appended
    }

    pub fn skipped_known(&self) -> usize {
        self.skipped_known
    }

    fn log_progress(&self) {
        let current = self.current_count();
        if should_log(current, self.total) {
            info!(
                "  → Progress: {}/{} players ({} failed, {} participations appended)",
                current, self.total, self.failed, self.appended
            );
        }
    }
}

fn should_log(current: usize, total: usize) -> bool {
    current % 10 == 0 || current == total
}

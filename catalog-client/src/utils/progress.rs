/// Callback receiving a completion percentage in `1..=100`.
pub type ProgressSink<'a> = &'a mut (dyn FnMut(u8) + Send);

/// Maps transferred bytes of the current stage onto an overall percentage.
///
/// Reported values only ever increase, and `finish` always ends on 100.
pub struct Progress<'a> {
    sink: Option<ProgressSink<'a>>,
    last: u8,
    base: u8,
    span: u8,
}

impl<'a> Progress<'a> {
    pub fn new(sink: Option<ProgressSink<'a>>) -> Self {
        Self {
            sink,
            last: 0,
            base: 0,
            span: 100,
        }
    }

    pub fn silent() -> Self {
        Self::new(None)
    }

    /// Directs later transfer updates into `base..base + span`.
    pub fn stage(&mut self, base: u8, span: u8) {
        self.base = base.min(100);
        self.span = span.min(100 - self.base);
    }

    pub fn transferred(&mut self, loaded: u64, total: u64) {
        if total == 0 {
            return;
        }
        let loaded = loaded.min(total);
        let within = (loaded as u128 * self.span as u128 / total as u128) as u8;
        self.report(self.base + within);
    }

    pub fn report(&mut self, percent: u8) {
        let percent = percent.min(100);
        if percent <= self.last {
            return;
        }
        self.last = percent;
        if let Some(sink) = self.sink.as_mut() {
            sink(percent);
        }
    }

    pub fn finish(&mut self) {
        self.report(100);
    }

    pub fn last(&self) -> u8 {
        self.last
    }
}

impl Default for Progress<'_> {
    fn default() -> Self {
        Self::silent()
    }
}

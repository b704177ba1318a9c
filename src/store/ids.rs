use std::time::{SystemTime, UNIX_EPOCH};

/// Issues node ids of the form `node-{n}`.
///
/// `n` starts from the wall clock in milliseconds but never repeats or goes
/// backwards within a session, even when called many times per millisecond
/// or when the clock steps back.
#[derive(Debug, Default)]
pub struct NodeIdGenerator {
    last: u64,
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id for which `taken` returns false.
    pub fn next(&mut self, taken: impl Fn(&str) -> bool) -> String {
        let mut stamp = now_millis().max(self.last + 1);
        loop {
            let id = format!("node-{}", stamp);
            if !taken(&id) {
                self.last = stamp;
                return id;
            }
            stamp += 1;
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Id for an edge created by a connect gesture.
pub fn edge_id(source: &str, target: &str, taken: impl Fn(&str) -> bool) -> String {
    let base = format!("e{}-{}", source, target);
    if !taken(&base) {
        return base;
    }
    (1..)
        .map(|n| format!("{}-{}", base, n))
        .find(|id| !taken(id))
        .unwrap_or(base)
}

use log::{debug, info, warn};
use std::path::Path;
pub mod error;
pub mod logfile;
pub mod plot;
pub mod render;

pub use error::LatencyError;

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Lines written by the scanner before the first SSID group.
pub const HEADER_LINES: usize = 4;

/// The logfile latencies are in seconds, the plot is in microseconds.
pub const USEC_PER_SEC: f64 = 1_000_000.;

pub const DEFAULT_LOGFILE: &str = "ssids.txt";
pub const DEFAULT_PNGFILE: &str = "latency.png";

/// The main struct for the latency time series of one SSID
#[derive(Debug, Clone, PartialEq)]
pub struct TimeLatency {
    pub label: String,
    pub time: Vec<f64>,
    pub latency: Vec<f64>,
}

impl TimeLatency {
    pub fn new(label: &str, capacity: usize) -> TimeLatency {
        TimeLatency {
            label: label.to_string(),
            time: Vec::with_capacity(capacity),
            latency: Vec::with_capacity(capacity),
        }
    }

    /// Init a TimeLatency from the scanner logfile.
    /// The file is read at once and parsed with `from_log_str`.
    pub fn from_logfile(fin: &Path) -> Result<TimeLatency, LatencyError> {
        let text = std::fs::read_to_string(fin).map_err(|source| LatencyError::Io {
            path: fin.to_path_buf(),
            source,
        })?;
        let timelatency = TimeLatency::from_log_str(&text)?;
        info!(
            "read {} samples of '{}' from {}",
            timelatency.len(),
            timelatency.label,
            fin.display()
        );
        Ok(timelatency)
    }

    /// Parses the first group of the logfile text and normalizes it.
    /// Fails on the first bad line, no partial series is returned.
    pub fn from_log_str(text: &str) -> Result<TimeLatency, LatencyError> {
        let group = logfile::first_group(text)?;
        let mut timelatency = TimeLatency::new(group.label, group.lines.len());
        for (line_no, line) in group.lines {
            let record = logfile::parse_record(line, line_no)?;
            timelatency.time.push(record.time);
            timelatency.latency.push(record.latency);
        }
        if timelatency.is_empty() {
            return Err(LatencyError::EmptySeries);
        }
        if !timelatency.is_chronological() {
            warn!(
                "times of '{}' are not in chronological order, keeping the file order",
                timelatency.label
            );
        }
        timelatency.normalize();
        debug!("normalized series:\n{}", timelatency);
        Ok(timelatency)
    }

    /// shifts the time to start from 0 and converts the latency from sec to usec
    /// takes a mutable reference to modify the TimeLatency in-place
    pub fn normalize(&mut self) {
        if let Some(&t0) = self.time.first() {
            for t in self.time.iter_mut() {
                *t -= t0;
            }
        }
        for l in self.latency.iter_mut() {
            *l *= USEC_PER_SEC;
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn is_chronological(&self) -> bool {
        self.time.windows(2).all(|w| w[0] <= w[1])
    }

    pub fn summary(&self) -> Option<SeriesSummary> {
        let (tmin, tmax) = min_and_max(&self.time[..])?;
        let (min, max) = min_and_max(&self.latency[..])?;
        let mean = self.latency.iter().sum::<f64>() / self.latency.len() as f64;
        let span = chrono::Duration::microseconds(((tmax - tmin) * USEC_PER_SEC).round() as i64);
        Some(SeriesSummary {
            samples: self.len(),
            span,
            min,
            max,
            mean,
        })
    }

    /// plots the latency time series to png
    pub fn plot_latency(&self, fout: &Path) -> Result<(), LatencyError> {
        render::render(&self.time, &self.latency, fout)
    }
}

impl std::fmt::Display for TimeLatency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "time [sec], latency [usec]")?;
        for (t, l) in self.time.iter().zip(self.latency.iter()) {
            writeln!(f, "{},{}", t, l)?
        }
        Ok(())
    }
}

/// Sample count, time span and latency statistics of a series
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub samples: usize,
    pub span: chrono::Duration,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl std::fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} samples over {}, latency [usec] min {:.3}, mean {:.3}, max {:.3}",
            self.samples,
            format_span(self.span),
            self.min,
            self.mean,
            self.max
        )
    }
}

/// formats a duration as HH:MM:SS.mmm
pub fn format_span(d: chrono::Duration) -> String {
    let ms = d.num_milliseconds().abs();
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        ms / 3_600_000,
        ms / 60_000 % 60,
        ms / 1_000 % 60,
        ms % 1_000
    )
}

/// Reads the logfile and returns the normalized (time, latency) vectors.
pub fn parse_logfile(fin: &Path) -> Result<(Vec<f64>, Vec<f64>), LatencyError> {
    let timelatency = TimeLatency::from_logfile(fin)?;
    Ok((timelatency.time, timelatency.latency))
}

pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "SSID\n    timestamp  (latency)\n=========================\n\n";

    #[test]
    fn worked_example() {
        let text = format!("{}label\na (1.0) (0.002)\nb (2.0) (0.003)\n", HEADER);
        let tl = TimeLatency::from_log_str(&text).unwrap();
        assert_eq!(tl.label, "label");
        assert_eq!(tl.time, vec![0.0, 1.0]);
        assert_eq!(tl.latency, vec![2000.0, 3000.0]);
    }

    #[test]
    fn latency_scaling_is_exact() {
        let raw = [0.001234, 0.000123, 0.0457, 1.5];
        let mut text = format!("{}home\n", HEADER);
        for (i, l) in raw.iter().enumerate() {
            text.push_str(&format!("    {}.250   ({})\n", 100 + i, l));
        }
        let tl = TimeLatency::from_log_str(&text).unwrap();
        assert_eq!(tl.len(), raw.len());
        assert_eq!(tl.time[0], 0.0);
        for (l, r) in tl.latency.iter().zip(raw.iter()) {
            assert_eq!(*l, r * 1_000_000.);
        }
    }

    #[test]
    fn zero_latencies_stay_zero() {
        let text = format!("{}home\n1.0 (0.0)\n2.0 (0.000000)\n3.0 (0)\n", HEADER);
        let tl = TimeLatency::from_log_str(&text).unwrap();
        assert!(tl.latency.iter().all(|&l| l == 0.0));
    }

    #[test]
    fn unsorted_times_keep_file_order() {
        let text = format!("{}home\n5.0 (0.1)\n3.0 (0.2)\n7.0 (0.3)\n", HEADER);
        let tl = TimeLatency::from_log_str(&text).unwrap();
        assert_eq!(tl.time, vec![0.0, -2.0, 2.0]);
        assert!(!tl.is_chronological());
    }

    #[test]
    fn label_without_data() {
        let text = format!("{}home\n\nother\n1.0 (0.1)\n", HEADER);
        assert!(matches!(
            TimeLatency::from_log_str(&text),
            Err(LatencyError::EmptySeries)
        ));
    }

    #[test]
    fn bad_line_reports_its_number() {
        let text = format!("{}home\n1.0 (0.1)\n2.0 (oops)\n", HEADER);
        match TimeLatency::from_log_str(&text) {
            Err(LatencyError::Parse { line, .. }) => assert_eq!(line, 7),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn normalize_empty_series() {
        let mut tl = TimeLatency::new("empty", 0);
        tl.normalize();
        assert!(tl.is_empty());
        assert!(tl.summary().is_none());
    }

    #[test]
    fn summary_of_series() {
        let tl = TimeLatency {
            label: "home".to_string(),
            time: vec![0.0, 61.5, 3725.25],
            latency: vec![1000.0, 3000.0, 2000.0],
        };
        let s = tl.summary().unwrap();
        assert_eq!(s.samples, 3);
        assert_eq!(s.min, 1000.0);
        assert_eq!(s.max, 3000.0);
        assert_eq!(s.mean, 2000.0);
        assert_eq!(s.span, chrono::Duration::milliseconds(3_725_250));
        assert_eq!(format_span(s.span), "01:02:05.250");
    }

    #[test]
    fn display_one_row_per_sample() {
        let tl = TimeLatency {
            label: "home".to_string(),
            time: vec![0.0, 1.5],
            latency: vec![1234.0, 988.0],
        };
        assert_eq!(tl.to_string(), "time [sec], latency [usec]\n0,1234\n1.5,988\n");
    }

    #[test]
    fn min_and_max_of_slice() {
        assert_eq!(min_and_max(&[3.0, -1.0, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(min_and_max::<f64>(&[]), None);
    }
}

//! GPS speed watcher
//!
//! Background thread subscribed to the local gpsd socket. Each TPV report
//! yields a speed in m/s, converted to km/h and rounded before delivery.
//! Errors never surface: the watcher drops bad reports and reconnects with
//! a delay, and the dashboard just keeps showing "Searching GPS".

use serde::Deserialize;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::sync::mpsc;
use std::time::Duration;

const GPSD_ADDR: &str = "127.0.0.1:2947";
const WATCH_COMMAND: &str = "?WATCH={\"enable\":true,\"json\":true}\n";
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// One gpsd report; only TPV frames carry speed
#[derive(Debug, Deserialize)]
struct Report {
    class: String,
    /// Ground speed in metres per second
    speed: Option<f64>,
}

/// Spawn the watcher thread. Speed updates (km/h, rounded) arrive on the
/// returned channel; the thread exits when the receiver is dropped.
pub fn watch() -> mpsc::Receiver<u32> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || run(tx));
    rx
}

fn run(tx: mpsc::Sender<u32>) {
    loop {
        if stream_reports(&tx).is_err() {
            // Receiver gone — shell is shutting down
            return;
        }
        std::thread::sleep(RECONNECT_DELAY);
    }
}

/// Stream reports from one gpsd connection until it drops.
/// `Err` means the channel receiver is gone and the thread should exit;
/// connection problems come back as `Ok(())` and trigger a reconnect.
fn stream_reports(tx: &mpsc::Sender<u32>) -> Result<(), mpsc::SendError<u32>> {
    let mut stream = match TcpStream::connect(GPSD_ADDR) {
        Ok(s) => s,
        Err(_) => return Ok(()),
    };
    if stream.write_all(WATCH_COMMAND.as_bytes()).is_err() {
        return Ok(());
    }

    let reader = BufReader::new(match stream.try_clone() {
        Ok(s) => s,
        Err(_) => return Ok(()),
    });

    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => return Ok(()),
        };
        if let Some(kmh) = speed_kmh_from_report(&line) {
            tx.send(kmh)?;
        }
    }
    Ok(())
}

/// Extract a rounded km/h speed from one report line, if it is a TPV frame
/// with a speed field. Anything else is ignored.
fn speed_kmh_from_report(line: &str) -> Option<u32> {
    let report: Report = serde_json::from_str(line).ok()?;
    if report.class != "TPV" {
        return None;
    }
    let mps = report.speed?;
    if !mps.is_finite() || mps < 0.0 {
        return None;
    }
    Some((mps * 3.6).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tpv_speed_converts_to_kmh() {
        // 13.9 m/s ≈ 50 km/h
        let line = r#"{"class":"TPV","mode":3,"speed":13.9}"#;
        assert_eq!(speed_kmh_from_report(line), Some(50));
    }

    #[test]
    fn test_rounding() {
        // 1.0 m/s = 3.6 km/h → 4
        assert_eq!(
            speed_kmh_from_report(r#"{"class":"TPV","speed":1.0}"#),
            Some(4)
        );
        assert_eq!(
            speed_kmh_from_report(r#"{"class":"TPV","speed":0.0}"#),
            Some(0)
        );
    }

    #[test]
    fn test_non_tpv_frames_ignored() {
        assert_eq!(
            speed_kmh_from_report(r#"{"class":"SKY","satellites":[]}"#),
            None
        );
        assert_eq!(
            speed_kmh_from_report(r#"{"class":"VERSION","release":"3.25"}"#),
            None
        );
    }

    #[test]
    fn test_bad_input_ignored() {
        assert_eq!(speed_kmh_from_report("not json"), None);
        assert_eq!(speed_kmh_from_report(r#"{"class":"TPV"}"#), None);
        assert_eq!(
            speed_kmh_from_report(r#"{"class":"TPV","speed":-2.0}"#),
            None
        );
    }
}

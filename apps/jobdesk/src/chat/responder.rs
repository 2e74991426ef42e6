//! Simulated counter-party for the chat widget.
//!
//! `MessageSource` supplies the next simulated sentence. `AutoResponder` is the
//! schedule: it is advanced by elapsed time and reports how many messages fell due,
//! which lets tests drive it in virtual time. `spawn_auto_responder` runs the same
//! schedule on a tokio interval and stops when the returned handle is dropped.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use rand::seq::SliceRandom;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::chat::transcript::Transcript;
use crate::models::chat::SenderId;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

const SENTENCES: [&str; 8] = [
    "Başvurunuz için teşekkür ederiz.",
    "Özgeçmişinizi inceledik, oldukça ilgi çekici.",
    "Uygun olduğunuz bir görüşme saati paylaşabilir misiniz?",
    "Pozisyonla ilgili sorularınız var mı?",
    "Ekibimiz sizinle tanışmayı çok istiyor.",
    "Maaş beklentinizi öğrenebilir miyiz?",
    "Ne zaman işe başlayabilirsiniz?",
    "Kısa süre içinde size dönüş yapacağız.",
];

pub trait MessageSource: Send + Sync {
    fn next_message(&self) -> String;
}

/// Picks uniformly at random from a fixed sentence set.
#[derive(Debug, Clone)]
pub struct RandomSentenceSource {
    sentences: Vec<String>,
}

impl RandomSentenceSource {
    pub fn new(sentences: Vec<String>) -> Self {
        Self { sentences }
    }
}

impl Default for RandomSentenceSource {
    fn default() -> Self {
        Self::new(SENTENCES.iter().map(|s| s.to_string()).collect())
    }
}

impl MessageSource for RandomSentenceSource {
    fn next_message(&self) -> String {
        self.sentences
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_default()
    }
}

/// Fixed-period schedule advanced by elapsed time.
#[derive(Debug, Clone)]
pub struct AutoResponder {
    period: Duration,
    /// Time accumulated since the last message fell due.
    pending: Duration,
}

impl AutoResponder {
    /// `period` must be non-zero.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            pending: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Advances the schedule by `elapsed` and returns the number of messages due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.pending += elapsed;
        let mut due = 0;
        while self.pending >= self.period {
            self.pending -= self.period;
            due += 1;
        }
        due
    }

    /// Advances the schedule and appends one message from `source` per tick due.
    pub fn advance_into(
        &mut self,
        elapsed: Duration,
        source: &dyn MessageSource,
        transcript: &mut Transcript,
    ) -> u32 {
        let due = self.advance(elapsed);
        for _ in 0..due {
            transcript.append(source.next_message(), SenderId::Other, Local::now());
        }
        due
    }
}

/// Owns the running responder task; dropping it stops the task.
#[derive(Debug)]
pub struct ResponderHandle {
    task: JoinHandle<()>,
}

impl ResponderHandle {
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for ResponderHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Appends one simulated message to `transcript` every `period`, starting one
/// period from now.
pub fn spawn_auto_responder(
    transcript: Arc<Mutex<Transcript>>,
    source: Arc<dyn MessageSource>,
    period: Duration,
) -> ResponderHandle {
    let mut schedule = AutoResponder::new(period);
    let period = schedule.period();
    info!(period_secs = period.as_secs_f32(), "Starting simulated chat responder");

    let first_tick = Instant::now() + period;
    let task = tokio::spawn(async move {
        let mut ticker = interval_at(first_tick, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let mut transcript = transcript.lock().await;
            let fired = schedule.advance_into(period, source.as_ref(), &mut transcript);
            debug!(fired, total = transcript.messages().len(), "simulated message appended");
        }
    });

    ResponderHandle { task }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(&'static str);

    impl MessageSource for FixedSource {
        fn next_message(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_advance_fifteen_seconds_fires_three_times() {
        let mut responder = AutoResponder::new(DEFAULT_INTERVAL);
        let mut transcript = Transcript::new();
        let fired = responder.advance_into(
            Duration::from_secs(15),
            &FixedSource("Merhaba"),
            &mut transcript,
        );
        assert_eq!(fired, 3);
        assert_eq!(transcript.count_from(SenderId::Other), 3);
    }

    #[test]
    fn test_advance_accumulates_partial_periods() {
        let mut responder = AutoResponder::new(DEFAULT_INTERVAL);
        assert_eq!(responder.advance(Duration::from_secs(3)), 0);
        assert_eq!(responder.advance(Duration::from_secs(3)), 1);
        assert_eq!(responder.advance(Duration::from_secs(4)), 1);
        assert_eq!(responder.advance(Duration::from_millis(4_999)), 0);
    }

    #[test]
    fn test_random_source_picks_from_sentence_set() {
        let source = RandomSentenceSource::default();
        for _ in 0..20 {
            let sentence = source.next_message();
            assert!(SENTENCES.contains(&sentence.as_str()));
        }
    }

    #[test]
    fn test_empty_sentence_set_yields_empty_text() {
        assert_eq!(RandomSentenceSource::new(Vec::new()).next_message(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_responder_appends_three_messages_in_fifteen_seconds() {
        let transcript = Arc::new(Mutex::new(Transcript::new()));
        let handle = spawn_auto_responder(
            transcript.clone(),
            Arc::new(FixedSource("Görüşme için uygun musunuz?")),
            DEFAULT_INTERVAL,
        );

        tokio::time::sleep(Duration::from_millis(15_100)).await;

        let guard = transcript.lock().await;
        assert_eq!(guard.count_from(SenderId::Other), 3);
        assert_eq!(guard.len(), 3);
        drop(guard);
        drop(handle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_responder() {
        let transcript = Arc::new(Mutex::new(Transcript::new()));
        let handle = spawn_auto_responder(
            transcript.clone(),
            Arc::new(FixedSource("Merhaba")),
            DEFAULT_INTERVAL,
        );
        tokio::time::sleep(Duration::from_millis(5_100)).await;
        handle.stop();

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(transcript.lock().await.len(), 1);
    }
}

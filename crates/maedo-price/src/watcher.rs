//! 주기적 시세 갱신 태스크.
//!
//! 단일 백그라운드 태스크가 설정된 주기로 시세를 조회하여 watch 채널에
//! 발행합니다. 조회는 태스크 안에서 순차적으로 일어나므로 동시에 두
//! 요청이 나가지 않으며, 수동 새로고침은 대기 중인 조회를 대체합니다.
//! 조회 실패 시 마지막 시세는 유지하고 오프라인 표시만 바꿉니다.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::provider::{PriceProvider, PriceQuote};

/// 감시 태스크가 발행하는 시세 상태.
#[derive(Debug, Clone, Default)]
pub struct PriceState {
    /// 마지막으로 성공한 시세 (아직 없으면 `None`)
    pub quote: Option<PriceQuote>,
    /// 마지막 조회의 성공 여부 (실패 시 기존 시세는 유지됨)
    pub online: bool,
}

/// 주기적 시세 감시자.
pub struct PriceWatcher {
    provider: Arc<dyn PriceProvider>,
    interval: Duration,
}

impl PriceWatcher {
    /// 새 감시자를 생성합니다.
    pub fn new(provider: Arc<dyn PriceProvider>, interval: Duration) -> Self {
        Self { provider, interval }
    }

    /// 감시 태스크를 시작하고 핸들을 반환합니다.
    ///
    /// 시작 직후 한 번 조회하며, 이후 주기마다 갱신합니다.
    pub fn spawn(self, shutdown: CancellationToken) -> PriceHandle {
        let (tx, rx) = watch::channel(PriceState::default());
        let refresh = Arc::new(Notify::new());
        let refresh_signal = refresh.clone();

        let task = tokio::spawn(async move {
            self.run(tx, refresh_signal, shutdown).await;
        });

        PriceHandle { rx, refresh, task }
    }

    async fn run(
        self,
        tx: watch::Sender<PriceState>,
        refresh: Arc<Notify>,
        shutdown: CancellationToken,
    ) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh_once(&tx).await;
                }
                _ = refresh.notified() => {
                    self.refresh_once(&tx).await;
                    // 수동 새로고침 직후의 정기 조회는 건너뛴다
                    ticker.reset();
                }
                _ = shutdown.cancelled() => {
                    info!(provider = self.provider.name(), "시세 감시 종료");
                    break;
                }
            }
        }
    }

    async fn refresh_once(&self, tx: &watch::Sender<PriceState>) {
        match self.provider.fetch_price().await {
            Ok(quote) => {
                tx.send_replace(PriceState {
                    quote: Some(quote),
                    online: true,
                });
            }
            Err(e) => {
                warn!(provider = self.provider.name(), "시세 조회 실패: {}", e);
                tx.send_modify(|state| state.online = false);
            }
        }
    }
}

/// 감시 태스크 핸들.
pub struct PriceHandle {
    rx: watch::Receiver<PriceState>,
    refresh: Arc<Notify>,
    task: JoinHandle<()>,
}

impl PriceHandle {
    /// 현재 시세 상태의 스냅샷을 반환합니다.
    pub fn state(&self) -> PriceState {
        self.rx.borrow().clone()
    }

    /// 상태 변경을 구독할 수 있는 수신자를 반환합니다.
    pub fn subscribe(&self) -> watch::Receiver<PriceState> {
        self.rx.clone()
    }

    /// 수동 새로고침을 요청합니다.
    ///
    /// 이미 대기 중인 요청이 있으면 하나로 합쳐집니다.
    pub fn request_refresh(&self) {
        self.refresh.notify_one();
    }

    /// 태스크 종료를 기다립니다. `spawn`에 전달한 토큰을 먼저 취소해야
    /// 합니다.
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            warn!("시세 감시 태스크 종료 실패: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PriceError, PriceResult};
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 호출 횟수에 따라 성공/실패를 반복하는 테스트 제공자.
    struct ScriptedProvider {
        prices: Vec<Option<Decimal>>,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(prices: Vec<Option<Decimal>>) -> Arc<Self> {
            Arc::new(Self {
                prices,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl PriceProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn fetch_price(&self) -> PriceResult<PriceQuote> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let step = self.prices[call.min(self.prices.len() - 1)];
            match step {
                Some(price) => Ok(PriceQuote {
                    price,
                    last_updated: Utc::now(),
                }),
                None => Err(PriceError::NetworkError("down".to_string())),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_fetch_published() {
        let provider = ScriptedProvider::new(vec![Some(dec!(163000000))]);
        let shutdown = CancellationToken::new();
        let handle =
            PriceWatcher::new(provider, Duration::from_secs(30)).spawn(shutdown.clone());

        let mut rx = handle.subscribe();
        rx.changed().await.unwrap();

        let state = rx.borrow().clone();
        assert!(state.online);
        assert_eq!(state.quote.unwrap().price, dec!(163000000));

        shutdown.cancel();
        handle.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_last_quote() {
        let provider = ScriptedProvider::new(vec![Some(dec!(163000000)), None]);
        let shutdown = CancellationToken::new();
        let handle =
            PriceWatcher::new(provider, Duration::from_secs(30)).spawn(shutdown.clone());

        let mut rx = handle.subscribe();
        // 첫 조회 성공
        rx.changed().await.unwrap();
        assert!(rx.borrow().online);

        // 다음 주기 조회 실패: 시세는 유지, 오프라인 표시
        rx.changed().await.unwrap();
        let state = rx.borrow().clone();
        assert!(!state.online);
        assert_eq!(state.quote.unwrap().price, dec!(163000000));

        shutdown.cancel();
        handle.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_refresh() {
        let provider =
            ScriptedProvider::new(vec![Some(dec!(163000000)), Some(dec!(164000000))]);
        let shutdown = CancellationToken::new();
        // 주기를 길게 잡아 수동 새로고침만 두 번째 조회를 일으키게 한다
        let handle =
            PriceWatcher::new(provider, Duration::from_secs(3600)).spawn(shutdown.clone());

        let mut rx = handle.subscribe();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().quote.clone().unwrap().price, dec!(163000000));

        handle.request_refresh();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().quote.clone().unwrap().price, dec!(164000000));

        shutdown.cancel();
        handle.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_task() {
        let provider = ScriptedProvider::new(vec![Some(dec!(163000000))]);
        let shutdown = CancellationToken::new();
        let handle =
            PriceWatcher::new(provider, Duration::from_secs(30)).spawn(shutdown.clone());

        shutdown.cancel();
        handle.join().await;
    }
}

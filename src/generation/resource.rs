//! Shared, lazily loaded model resource.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tracing::{info, warn};

use super::base::{GenerationRequest, ModelLoader, SequenceModel};
use crate::error::{Result, SummarizeError};

/// Handle to the process-wide model.
///
/// The model is loaded on first use and cached; a failed load leaves the
/// slot empty so the next call retries. One mutex guards both loading and
/// every tokenizer/generation call, so callers serialize on the model while
/// the surrounding string processing stays lock-free. The loaded flag is
/// readable without the lock, so status checks never wait on inference.
pub struct ModelHandle {
    loader: Arc<dyn ModelLoader>,
    slot: Mutex<Option<Box<dyn SequenceModel>>>,
    loaded: AtomicBool,
}

impl ModelHandle {
    /// Create an unloaded handle.
    pub fn new(loader: Arc<dyn ModelLoader>) -> Self {
        Self {
            loader,
            slot: Mutex::new(None),
            loaded: AtomicBool::new(false),
        }
    }

    /// Count tokens with the model's tokenizer.
    pub fn count_tokens(&self, text: &str) -> Result<usize> {
        self.with_model(|model| Ok(model.count_tokens(text)))
    }

    /// Run one generation call.
    pub fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.with_model(|model| model.generate(request))
    }

    /// Load the model now instead of on first use.
    pub fn warm_up(&self) -> Result<()> {
        self.with_model(|_| Ok(()))
    }

    /// Whether the model is currently loaded.
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Drop the loaded model and free its memory. Safe to call repeatedly.
    pub fn release(&self) {
        let mut slot = self.lock();
        self.loaded.store(false, Ordering::Release);
        if slot.take().is_some() {
            info!(loader = self.loader.name(), "Model released");
        }
    }

    fn with_model<T>(&self, call: impl FnOnce(&dyn SequenceModel) -> Result<T>) -> Result<T> {
        let mut slot = self.lock();

        if slot.is_none() {
            let started = Instant::now();
            match self.loader.load() {
                Ok(model) => {
                    info!(
                        loader = self.loader.name(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Model loaded"
                    );
                    *slot = Some(model);
                    self.loaded.store(true, Ordering::Release);
                }
                Err(e) => {
                    warn!(loader = self.loader.name(), error = %e, "Model load failed");
                    return Err(e);
                }
            }
        }

        match slot.as_deref() {
            Some(model) => call(model),
            None => Err(SummarizeError::unavailable("model slot is empty")),
        }
    }

    /// A panic inside a model call cannot leave the slot half-initialized: it
    /// holds either nothing or a fully loaded model.
    fn lock(&self) -> MutexGuard<'_, Option<Box<dyn SequenceModel>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::mpsc;
    use std::time::Duration;

    use crate::types::TokenRange;

    struct WordModel;

    impl SequenceModel for WordModel {
        fn count_tokens(&self, text: &str) -> usize {
            text.split_whitespace().count()
        }

        fn generate(&self, request: &GenerationRequest) -> Result<String> {
            Ok(request.input.to_uppercase())
        }
    }

    struct CountingLoader {
        loads: AtomicUsize,
        fail: bool,
    }

    impl ModelLoader for CountingLoader {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn load(&self) -> Result<Box<dyn SequenceModel>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SummarizeError::unavailable("weights missing"));
            }
            Ok(Box::new(WordModel))
        }
    }

    fn loader(fail: bool) -> Arc<CountingLoader> {
        Arc::new(CountingLoader {
            loads: AtomicUsize::new(0),
            fail,
        })
    }

    #[test]
    fn test_lazy_single_load() {
        let loader = loader(false);
        let handle = ModelHandle::new(loader.clone());
        assert!(!handle.is_loaded());

        assert_eq!(handle.count_tokens("a b c").unwrap(), 3);
        let request = GenerationRequest::new("abc", TokenRange::new(1, 5).unwrap(), 100);
        assert_eq!(handle.generate(&request).unwrap(), "ABC");

        assert!(handle.is_loaded());
        assert_eq!(loader.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_release_is_idempotent_and_reloads() {
        let loader = loader(false);
        let handle = ModelHandle::new(loader.clone());

        handle.warm_up().unwrap();
        handle.release();
        handle.release();
        assert!(!handle.is_loaded());

        handle.count_tokens("x").unwrap();
        assert_eq!(loader.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failed_load_is_retried() {
        let loader = loader(true);
        let handle = ModelHandle::new(loader.clone());

        let err = handle.count_tokens("x").unwrap_err();
        assert!(err.is_resource_error());
        assert!(handle.count_tokens("x").is_err());
        assert_eq!(loader.loads.load(Ordering::SeqCst), 2);
        assert!(!handle.is_loaded());
    }

    struct SlowModel {
        started: Mutex<mpsc::Sender<()>>,
    }

    impl SequenceModel for SlowModel {
        fn count_tokens(&self, text: &str) -> usize {
            text.split_whitespace().count()
        }

        fn generate(&self, _request: &GenerationRequest) -> Result<String> {
            let _ = self.started.lock().unwrap().send(());
            std::thread::sleep(Duration::from_millis(1500));
            Ok("xong".to_string())
        }
    }

    struct SlowLoader {
        started: Mutex<Option<mpsc::Sender<()>>>,
    }

    impl ModelLoader for SlowLoader {
        fn name(&self) -> &'static str {
            "slow"
        }

        fn load(&self) -> Result<Box<dyn SequenceModel>> {
            let sender = self
                .started
                .lock()
                .unwrap()
                .take()
                .ok_or_else(|| SummarizeError::unavailable("already loaded"))?;
            Ok(Box::new(SlowModel {
                started: Mutex::new(sender),
            }))
        }
    }

    #[test]
    fn test_is_loaded_does_not_wait_for_generation() {
        let (tx, rx) = mpsc::channel();
        let handle = Arc::new(ModelHandle::new(Arc::new(SlowLoader {
            started: Mutex::new(Some(tx)),
        })));

        let worker = {
            let handle = Arc::clone(&handle);
            std::thread::spawn(move || {
                let request = GenerationRequest::new("bài", TokenRange::new(1, 5).unwrap(), 10);
                handle.generate(&request).unwrap()
            })
        };

        rx.recv().unwrap();
        let started = Instant::now();
        assert!(handle.is_loaded());
        assert!(started.elapsed() < Duration::from_millis(500));

        assert_eq!(worker.join().unwrap(), "xong");
    }

    #[test]
    fn test_concurrent_callers_share_one_load() {
        let loader = loader(false);
        let handle = Arc::new(ModelHandle::new(loader.clone()));

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let handle = Arc::clone(&handle);
                std::thread::spawn(move || handle.count_tokens("one two").unwrap())
            })
            .collect();

        for worker in workers {
            assert_eq!(worker.join().unwrap(), 2);
        }
        assert_eq!(loader.loads.load(Ordering::SeqCst), 1);
    }
}

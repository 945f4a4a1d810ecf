use std::future::Future;

/// A dedicated thread owning the tokio runtime used for background work.
pub struct TokioThread {
    handle: TokioHandle,
    _thread_handle: std::thread::JoinHandle<()>,
}

#[derive(Clone)]
pub struct TokioHandle(tokio::runtime::Handle);
impl TokioHandle {
    /// Spawn a fire-and-forget task. Safe to call from any thread, including
    /// from within already-running tasks.
    pub fn spawn(&self, task: impl Future<Output = ()> + Send + 'static) {
        self.0.spawn(task);
    }
}

impl TokioThread {
    pub fn new() -> Self {
        let (handle_tx, handle_rx) = std::sync::mpsc::channel();

        let thread_handle = std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("failed to build tokio runtime");
            handle_tx
                .send(runtime.handle().clone())
                .expect("runtime handle receiver dropped");
            runtime.block_on(std::future::pending::<()>());
        });

        let handle = handle_rx
            .recv()
            .expect("tokio thread exited before providing a handle");

        Self {
            handle: TokioHandle(handle),
            _thread_handle: thread_handle,
        }
    }

    pub fn handle(&self) -> TokioHandle {
        self.handle.clone()
    }
}

use std::fs::File;
use std::sync::Once;

static INIT: Once = Once::new();

/// Directs proteus's internal logging to the given file descriptor, matching the
/// `proteus_setLogSink(int fd)` entry point of the original library. Passing a negative
/// fd disables logging entirely. Only the first call takes effect; subsequent calls are
/// no-ops, since `tracing`'s global subscriber can only be installed once per process.
pub fn set_log_sink(fd: i32) {
    INIT.call_once(|| {
        if fd < 0 {
            let _ = tracing_subscriber::fmt()
                .with_writer(std::io::sink)
                .try_init();
            return;
        }

        #[cfg(unix)]
        {
            use std::os::fd::FromRawFd;
            let file = unsafe { File::from_raw_fd(fd) };
            let _ = tracing_subscriber::fmt()
                .with_writer(move || file.try_clone().expect("dup log sink fd"))
                .try_init();
        }

        #[cfg(not(unix))]
        {
            let _ = tracing_subscriber::fmt().try_init();
        }
    });
}

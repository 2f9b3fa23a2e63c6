//! Call-site macros.
//!
//! Each macro takes the logger first (a [`crate::Logger`] or a
//! [`crate::SharedLogger`]) and records `file!()`/`line!()` of the caller.
//! The `log_*` forms take a literal message that is passed through
//! untouched; the `logf_*` forms take `format_args!` syntax.

/// Log a literal message at `level`.
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $message:expr $(,)?) => {
        $logger.log($level, ::core::file!(), ::core::line!(), $message)
    };
}

/// Log a formatted message at `level`.
#[macro_export]
macro_rules! logf_at {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.logf(
            $level,
            ::core::file!(),
            ::core::line!(),
            ::core::format_args!($($arg)+),
        )
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $message:expr $(,)?) => {
        $crate::log_at!($logger, $crate::Severity::Debug, $message)
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $message:expr $(,)?) => {
        $crate::log_at!($logger, $crate::Severity::Info, $message)
    };
}

#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $message:expr $(,)?) => {
        $crate::log_at!($logger, $crate::Severity::Warning, $message)
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $message:expr $(,)?) => {
        $crate::log_at!($logger, $crate::Severity::Error, $message)
    };
}

#[macro_export]
macro_rules! logf_debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf_at!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! logf_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf_at!($logger, $crate::Severity::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! logf_warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf_at!($logger, $crate::Severity::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! logf_error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf_at!($logger, $crate::Severity::Error, $($arg)+)
    };
}

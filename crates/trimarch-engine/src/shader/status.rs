/// Shared status check for compiled shaders and linked programs.
///
/// `status` and `info_log` are the object-specific queries (compile vs link).
/// On failure the diagnostic is logged and returned; the log is only fetched
/// when the status query fails.
pub(crate) fn check_status<C, O>(
    compiler: &C,
    object: &O,
    status: impl Fn(&C, &O) -> bool,
    info_log: impl Fn(&C, &O) -> String,
) -> Result<(), String>
where
    C: ?Sized,
{
    if status(compiler, object) {
        return Ok(());
    }

    let log = info_log(compiler, object);
    log::error!("{log}");
    Err(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct LogCounter {
        log_reads: Cell<usize>,
    }

    #[test]
    fn passing_status_skips_log_retrieval() {
        let counter = LogCounter { log_reads: Cell::new(0) };
        let res = check_status(
            &counter,
            &true,
            |_, ok| *ok,
            |p, _| {
                p.log_reads.set(p.log_reads.get() + 1);
                String::from("unused")
            },
        );
        assert_eq!(res, Ok(()));
        assert_eq!(counter.log_reads.get(), 0);
    }

    #[test]
    fn failing_status_returns_log() {
        let counter = LogCounter { log_reads: Cell::new(0) };
        let res = check_status(
            &counter,
            &false,
            |_, ok| *ok,
            |p, _| {
                p.log_reads.set(p.log_reads.get() + 1);
                String::from("error: expected `;`")
            },
        );
        assert_eq!(res, Err(String::from("error: expected `;`")));
        assert_eq!(counter.log_reads.get(), 1);
    }
}

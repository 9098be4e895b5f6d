//! Recording adapters that capture interactions to cassettes.

pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod imagery;

pub use clock::RecordingClock;
pub use filesystem::RecordingFileSystem;
pub use id_gen::RecordingIdGenerator;
pub use imagery::RecordingImageryService;

use serde::Serialize;

use crate::cassette::session::SharedRecorder;

/// Record an interaction with a simple (non-Result) return value.
///
/// Mirror of `replaying::next_output`.
pub(crate) fn record_interaction<I, O>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let input_json = serde_json::to_value(input).expect("failed to serialize recording input");
    let output_json = serde_json::to_value(output).expect("failed to serialize recording output");

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input_json, output_json);
}

/// Record a `Result<T, E>` interaction using the Ok/Err JSON convention.
///
/// Mirror of `replaying::replay_result`:
/// - `Ok(v)` is serialized as `{"Ok": v}`
/// - `Err(e)` is serialized as `{"Err": e.to_string()}`
pub(crate) fn record_result<T, E, I>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let output = match result {
        Ok(v) => {
            let inner = serde_json::to_value(v).expect("failed to serialize Ok value");
            serde_json::json!({ "Ok": inner })
        }
        Err(e) => serde_json::json!({ "Err": e.to_string() }),
    };
    record_interaction(recorder, port, method, input, &output);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use crate::cassette::recorder::CassetteRecorder;
    use crate::ports::{ExportTicket, ImageryError};

    #[test]
    fn results_use_ok_err_envelope() {
        let recorder: SharedRecorder =
            Arc::new(Mutex::new(CassetteRecorder::new("unused.yaml", "imagery")));
        let accepted: Result<ExportTicket, ImageryError> = Ok(ExportTicket {
            operation: "projects/p/operations/OP1".into(),
        });
        let rejected: Result<ExportTicket, ImageryError> = Err(ImageryError::Api {
            status: 403,
            message: "permission denied".into(),
        });

        record_result(&recorder, "imagery", "start_export", &(), &accepted);
        record_result(&recorder, "imagery", "start_export", &(), &rejected);

        let guard = recorder.lock().unwrap();
        let outputs: Vec<&serde_json::Value> =
            guard.interactions().iter().map(|i| &i.output).collect();
        assert_eq!(
            outputs[0],
            &json!({"Ok": {"operation": "projects/p/operations/OP1"}})
        );
        assert_eq!(
            outputs[1],
            &json!({"Err": "Earth Engine API error (403): permission denied"})
        );
    }
}

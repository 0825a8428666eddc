use std::io::Read;

use gcd_talker_lib::{GcdTalker, handle_json};

use crate::CliError;

/// Answer one JSON request. The request comes from the argument, or stdin
/// when omitted; the response is printed as a single JSON line.
///
/// Failed lookups are reported inside the response, so this only fails when
/// stdin cannot be read or the response cannot be written.
pub(crate) fn run_request(talker: &GcdTalker, json: Option<&str>) -> Result<(), CliError> {
    let request = match json {
        Some(json) => json.to_string(),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let response = handle_json(talker, request.trim());
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

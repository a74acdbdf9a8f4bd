//! Decoded invocation results.

use crate::http::HttpResponse;

/// The decoded body, tagged by whether the response status was 2xx.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<O, E> {
    Ok(O),
    Err(E),
}

/// Result of `ApiClient::invoke`: exactly one decoded body plus the response
/// it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<O, E> {
    pub outcome: Outcome<O, E>,
    pub response: HttpResponse,
}

impl<O, E> ApiResult<O, E> {
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Ok(_))
    }

    pub fn ok(&self) -> Option<&O> {
        match &self.outcome {
            Outcome::Ok(value) => Some(value),
            Outcome::Err(_) => None,
        }
    }

    pub fn err(&self) -> Option<&E> {
        match &self.outcome {
            Outcome::Ok(_) => None,
            Outcome::Err(value) => Some(value),
        }
    }

    pub fn status(&self) -> u16 {
        self.response.status
    }

    /// The `(ok, err, response)` view. One of the first two is always `None`.
    pub fn into_parts(self) -> (Option<O>, Option<E>, HttpResponse) {
        match self.outcome {
            Outcome::Ok(value) => (Some(value), None, self.response),
            Outcome::Err(value) => (None, Some(value), self.response),
        }
    }

    /// Collapse into a `Result`, dropping the response.
    pub fn into_result(self) -> Result<O, E> {
        match self.outcome {
            Outcome::Ok(value) => Ok(value),
            Outcome::Err(value) => Err(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    #[test]
    fn ok_outcome_parts() {
        let result: ApiResult<&str, &str> = ApiResult {
            outcome: Outcome::Ok("yes"),
            response: response(200),
        };
        assert!(result.is_ok());
        assert_eq!(result.ok(), Some(&"yes"));
        assert_eq!(result.err(), None);
        let (ok, err, res) = result.into_parts();
        assert_eq!(ok, Some("yes"));
        assert_eq!(err, None);
        assert_eq!(res.status, 200);
    }

    #[test]
    fn err_outcome_parts() {
        let result: ApiResult<&str, &str> = ApiResult {
            outcome: Outcome::Err("no"),
            response: response(403),
        };
        assert!(!result.is_ok());
        assert_eq!(result.status(), 403);
        assert_eq!(result.into_result(), Err("no"));
    }
}

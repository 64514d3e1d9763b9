//! Success envelopes shared by the user endpoints.

use serde::Serialize;

const SUCCESS: &str = "success";

/// `{ "status": "success", "data": ... }`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: SUCCESS,
            data,
        }
    }
}

/// `{ "status": "success", "results": N, "data": [...] }`
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub status: &'static str,
    pub results: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            status: SUCCESS,
            results: data.len(),
            data,
        }
    }
}

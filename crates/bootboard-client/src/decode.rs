use bootboard_types::{FetchError, PageRequest, Record, ResultPage};
use serde_json::{Map, Value};

/// Decode a results response body into a typed page.
///
/// `result` may arrive as an array or as a JSON string holding the array.
/// `skip` and `limit` fall back to the request's values when the server
/// leaves them out; `count` is required.
pub fn decode_page(body: &[u8], request: &PageRequest<'_>) -> Result<ResultPage, FetchError> {
    let Value::Object(mut object) = serde_json::from_slice::<Value>(body)? else {
        return Err(FetchError::malformed("response body is not a JSON object"));
    };

    let count = object
        .get("count")
        .and_then(Value::as_u64)
        .ok_or_else(|| FetchError::malformed("missing or invalid 'count'"))?;
    let skip = paging_field(&object, "skip", request.skip)?;
    let limit = paging_field(&object, "limit", request.limit())?;

    if limit == 0 {
        return Err(FetchError::malformed("'limit' must be greater than 0"));
    }

    let items = match object.remove("result") {
        Some(Value::Array(items)) => items,
        Some(Value::String(encoded)) => match serde_json::from_str::<Value>(&encoded)? {
            Value::Array(items) => items,
            _ => {
                return Err(FetchError::malformed(
                    "double-encoded 'result' is not an array",
                ));
            }
        },
        Some(_) => return Err(FetchError::malformed("'result' is not an array")),
        None => return Err(FetchError::malformed("missing 'result'")),
    };

    if items.len() as u64 > limit {
        return Err(FetchError::malformed(format!(
            "page holds {} records but limit is {}",
            items.len(),
            limit
        )));
    }

    let result = items
        .into_iter()
        .map(serde_json::from_value::<Record>)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ResultPage {
        count,
        skip,
        limit,
        result,
    })
}

fn paging_field(
    object: &Map<String, Value>,
    key: &str,
    fallback: u64,
) -> Result<u64, FetchError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(fallback),
        Some(value) => value
            .as_u64()
            .ok_or_else(|| FetchError::malformed(format!("invalid '{}'", key))),
    }
}

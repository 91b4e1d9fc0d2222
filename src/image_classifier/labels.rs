use crate::error::Error;
use std::path::Path;

/// Reads class labels, index order preserved. `.json` files may hold an array
/// of names or an object keyed by class index (optionally under `id2label`);
/// anything else is read as one label per line.
pub fn read_labels(path: &Path) -> Result<Vec<String>, Error> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::ModelLoad(format!("failed to read labels {}: {}", path.display(), e))
    })?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let labels = if is_json {
        parse_json_labels(&content)?
    } else {
        parse_text_labels(&content)
    };

    if labels.is_empty() {
        return Err(Error::ModelLoad(format!(
            "labels file {} is empty",
            path.display()
        )));
    }

    Ok(labels)
}

pub fn parse_text_labels(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| strip_wordnet_id(line).to_string())
        .collect()
}

// "n02123045 tabby, tabby cat" -> "tabby, tabby cat"
fn strip_wordnet_id(line: &str) -> &str {
    match line.split_once(' ') {
        Some((id, rest))
            if id.len() == 9
                && id.starts_with('n')
                && id[1..].chars().all(|c| c.is_ascii_digit()) =>
        {
            rest.trim()
        }
        _ => line,
    }
}

pub fn parse_json_labels(content: &str) -> Result<Vec<String>, Error> {
    let value: serde_json::Value = serde_json::from_str(content)?;

    if let Some(array) = value.as_array() {
        return array
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| Error::ModelLoad(format!("label {} is not a string", v)))
            })
            .collect();
    }

    let map = value
        .get("id2label")
        .unwrap_or(&value)
        .as_object()
        .ok_or_else(|| Error::ModelLoad("labels JSON must be an array or object".to_string()))?;

    let mut labels = map
        .iter()
        .map(|(k, v)| {
            let index = k
                .parse::<usize>()
                .map_err(|_| Error::ModelLoad(format!("label index '{}' is not a number", k)))?;
            let label = v
                .as_str()
                .ok_or_else(|| Error::ModelLoad(format!("label {} is not a string", v)))?;
            Ok((index, label.to_string()))
        })
        .collect::<Result<Vec<(usize, String)>, Error>>()?;

    labels.sort_by_key(|(index, _)| *index);
    Ok(labels.into_iter().map(|(_, label)| label).collect())
}

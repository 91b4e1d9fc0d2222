use crate::error::Error;
use crate::library::logger::interface::Logger;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

// Held for the whole check-and-fetch so concurrent loads never download the
// same file twice.
static DOWNLOADS: Mutex<()> = Mutex::new(());

/// Makes sure `path` exists, fetching it from `url` when it does not.
pub fn ensure_file(path: &Path, url: Option<&str>, logger: &dyn Logger) -> Result<(), Error> {
    if path.exists() {
        return Ok(());
    }

    let _guard = DOWNLOADS.lock().unwrap_or_else(PoisonError::into_inner);
    if path.exists() {
        return Ok(());
    }

    match url {
        Some(url) => download_file(url, path, logger),
        None => Err(Error::ModelLoad(format!(
            "{} not found and no download url is configured",
            path.display()
        ))),
    }
}

fn download_file(url: &str, dest: &Path, logger: &dyn Logger) -> Result<(), Error> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::ModelLoad(format!("failed to create {}: {}", parent.display(), e))
        })?;
    }

    let _ = logger.info(&format!("Downloading {} to {}", url, dest.display()));

    let mut response = reqwest::blocking::get(url)?;

    if !response.status().is_success() {
        return Err(Error::ModelLoad(format!(
            "failed to download {}: HTTP {}",
            url,
            response.status()
        )));
    }

    // Written next to the destination and renamed so a failed download never
    // leaves a truncated model behind.
    let partial = partial_path(dest);
    let mut file = File::create(&partial)?;
    let written = match response.copy_to(&mut file) {
        Ok(written) => written,
        Err(e) => {
            drop(file);
            let _ = std::fs::remove_file(&partial);
            return Err(e.into());
        }
    };
    file.sync_all()?;
    drop(file);
    std::fs::rename(&partial, dest)?;

    let _ = logger.info(&format!("Downloaded {} bytes to {}", written, dest.display()));

    Ok(())
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{:016x}.part", rand::random::<u64>()));
    dest.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;
    use chrono::Offset;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::Arc;
    use std::time::Duration;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("image-predictor-download-{}", rand::random::<u64>()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Serves `body` to every connection in small chunks, counting requests.
    fn serve_slowly(body: Vec<u8>) -> (String, Arc<Mutex<usize>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/mobilenet.onnx", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(0));
        let counter = requests.clone();

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                *counter.lock().unwrap() += 1;
                let body = body.clone();
                std::thread::spawn(move || {
                    let mut reader = BufReader::new(stream.try_clone().unwrap());
                    let mut line = String::new();
                    while reader.read_line(&mut line).unwrap_or(0) > 0 && line != "\r\n" {
                        line.clear();
                    }
                    let header = format!(
                        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        body.len()
                    );
                    let _ = stream.write_all(header.as_bytes());
                    for chunk in body.chunks(4096) {
                        if stream.write_all(chunk).is_err() {
                            return;
                        }
                        std::thread::sleep(Duration::from_millis(20));
                    }
                });
            }
        });

        (url, requests)
    }

    #[test]
    fn test_existing_file_is_not_fetched() {
        let logger = LoggerConsole::new(chrono::Utc.fix());
        let path = std::env::temp_dir().join(format!("image-predictor-{}.onnx", rand::random::<u64>()));
        std::fs::write(&path, b"weights").unwrap();

        assert!(ensure_file(&path, Some("http://127.0.0.1:9/unused"), &logger).is_ok());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_concurrent_fetches_of_same_file() {
        let body: Vec<u8> = (0..64 * 1024).map(|i| (i % 251) as u8).collect();
        let (url, requests) = serve_slowly(body.clone());
        let dir = temp_dir();
        let dest = dir.join("mobilenetv2-7.onnx");

        let fetches: Vec<_> = (0..2)
            .map(|i| {
                let (url, dest) = (url.clone(), dest.clone());
                std::thread::spawn(move || {
                    std::thread::sleep(Duration::from_millis(100 * i));
                    let logger = LoggerConsole::new(chrono::Utc.fix());
                    ensure_file(&dest, Some(&url), &logger)
                })
            })
            .collect();
        let results: Vec<_> = fetches.into_iter().map(|f| f.join().unwrap()).collect();

        assert_eq!(results, vec![Ok(()), Ok(())]);
        assert_eq!(std::fs::read(&dest).unwrap(), body);
        assert_eq!(*requests.lock().unwrap(), 1);
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 1);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_partial_path_is_unique_and_beside_destination() {
        let dest = Path::new("/models/mobilenetv2-7.onnx");
        let (a, b) = (partial_path(dest), partial_path(dest));

        assert_ne!(a, b);
        assert_eq!(a.parent(), dest.parent());
        assert!(a.to_string_lossy().ends_with(".part"));
    }

    #[test]
    fn test_missing_file_without_url() {
        let logger = LoggerConsole::new(chrono::Utc.fix());
        let result = ensure_file(Path::new("/no/such/model.onnx"), None, &logger);
        assert!(matches!(result, Err(Error::ModelLoad(_))));
    }
}

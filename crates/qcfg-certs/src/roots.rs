use std::fs;
use std::io;
use std::path::Path;

use rustls::pki_types::CertificateDer;
use rustls::RootCertStore;
use tracing::{debug, warn};

use crate::error::{CertError, CertResult};

fn io_error(path: &Path, source: io::Error) -> CertError {
    CertError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn is_inaccessible(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
    )
}

/// The platform's trust roots.
///
/// Certificates the platform store cannot provide or that fail to parse are
/// logged and skipped; on systems without a usable store the result is empty.
pub fn system_roots() -> RootCertStore {
    let mut store = RootCertStore::empty();
    let native = rustls_native_certs::load_native_certs();
    for e in &native.errors {
        warn!(error = %e, "failed to load platform trust roots");
    }
    let (added, ignored) = store.add_parsable_certificates(native.certs);
    debug!(added, ignored, "loaded platform trust roots");
    store
}

/// Add every valid PEM certificate in `pem` to `store`; returns how many.
pub fn append_pem(store: &mut RootCertStore, pem: &[u8]) -> usize {
    let mut reader = pem;
    let certs: Vec<CertificateDer<'static>> = rustls_pemfile::certs(&mut reader)
        .filter_map(Result::ok)
        .collect();
    let (added, _) = store.add_parsable_certificates(certs);
    added
}

/// Platform trust roots plus the certificates at `path`.
///
/// - `path` missing or not accessible: the platform roots alone.
/// - `path` a regular file: it must hold at least one valid certificate.
/// - `path` a directory: every top-level file is tried; unreadable or
///   invalid entries are skipped.
pub fn root_cas(path: impl AsRef<Path>) -> CertResult<RootCertStore> {
    let path = path.as_ref();
    let mut roots = system_roots();

    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if is_inaccessible(&e) => {
            debug!(path = %path.display(), error = %e, "no extra trust roots");
            return Ok(roots);
        }
        Err(e) => return Err(io_error(path, e)),
    };

    if !meta.is_dir() {
        let pem = match fs::read(path) {
            Ok(pem) => pem,
            Err(e) if is_inaccessible(&e) => return Ok(roots),
            Err(e) => return Err(io_error(path, e)),
        };
        if append_pem(&mut roots, &pem) == 0 {
            return Err(CertError::NoCertificates {
                path: path.to_path_buf(),
            });
        }
        return Ok(roots);
    }

    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) if is_inaccessible(&e) => return Ok(roots),
        Err(e) => return Err(io_error(path, e)),
    };
    for entry in entries {
        let Ok(entry) = entry else { continue };
        let file = entry.path();
        match fs::read(&file) {
            Ok(pem) => {
                let added = append_pem(&mut roots, &pem);
                debug!(file = %file.display(), added, "scanned trust root candidate");
            }
            Err(e) => debug!(file = %file.display(), error = %e, "skipped unreadable entry"),
        }
    }
    Ok(roots)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT_A: &str = "-----BEGIN CERTIFICATE-----
MIIBiTCCAS+gAwIBAgIUccaBgOmdwe4Z4TuqvcM/oet3vtowCgYIKoZIzj0EAwIw
GTEXMBUGA1UEAwwOcWNmZyB0ZXN0IHJvb3QwIBcNMjYxMDE2MjIxMzUxWhgPMjEy
NjA5MjIyMjEzNTFaMBkxFzAVBgNVBAMMDnFjZmcgdGVzdCByb290MFkwEwYHKoZI
zj0CAQYIKoZIzj0DAQcDQgAEl9RAbg6LlCtgmpRHR7Jhkix8XCNoxE8mAq2XtNqC
qQpNycFR84sr+XUBw9RCF90ag3Kan/lMRif9eeH358jwrKNTMFEwHQYDVR0OBBYE
FFAF4Wg452E+f8/SLpVMes+hkhv4MB8GA1UdIwQYMBaAFFAF4Wg452E+f8/SLpVM
es+hkhv4MA8GA1UdEwEB/wQFMAMBAf8wCgYIKoZIzj0EAwIDSAAwRQIhAPptyRVf
6K8OMqayTc9VUQt2hrTrDg+OJ4I+VkrsJ46YAiAPXD3KuDiQqvyMEzx/6mECIjyW
y547EIRhMB8654j0BA==
-----END CERTIFICATE-----
";

    const ROOT_B: &str = "-----BEGIN CERTIFICATE-----
MIIBozCCAUmgAwIBAgIUJquCLSIYSZ8KpKK57SAWnvzKho8wCgYIKoZIzj0EAwIw
JjEkMCIGA1UEAwwbcWNmZyB0ZXN0IGludGVybWVkaWF0ZSByb290MCAXDTI2MTAx
NjIyMTM1NloYDzIxMjYwOTIyMjIxMzU2WjAmMSQwIgYDVQQDDBtxY2ZnIHRlc3Qg
aW50ZXJtZWRpYXRlIHJvb3QwWTATBgcqhkjOPQIBBggqhkjOPQMBBwNCAATUfuky
Drt/YxtMZ7c27FeGylkH3GLYbj+++awyB5+h5/w9L50DNC90wr53AZ/HFJ3WXLQI
YvtE5jAbXbVcjI2Ao1MwUTAdBgNVHQ4EFgQU5yJoPsiULpiXx1n/VmS+KDyiYDAw
HwYDVR0jBBgwFoAU5yJoPsiULpiXx1n/VmS+KDyiYDAwDwYDVR0TAQH/BAUwAwEB
/zAKBggqhkjOPQQDAgNIADBFAiEAsGmZgxHeku4KJnjdocLSLMsGz0QslpUubUfG
sp/r3lwCIBXQ1Sgk/VPN4zJDwLFem9ODwv9nN1X8q88XJRRIvOsu
-----END CERTIFICATE-----
";

    #[test]
    fn append_pem_counts_certificates() {
        let mut store = RootCertStore::empty();
        let bundle = format!("{ROOT_A}{ROOT_B}");
        assert_eq!(append_pem(&mut store, bundle.as_bytes()), 2);
        assert_eq!(store.len(), 2);
        assert_eq!(append_pem(&mut store, b"not pem at all"), 0);
    }

    #[test]
    fn missing_path_yields_platform_roots() {
        let dir = tempfile::tempdir().unwrap();
        let roots = root_cas(dir.path().join("absent.pem")).unwrap();
        assert_eq!(roots.len(), system_roots().len());
    }

    #[test]
    fn single_file_is_added() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ca.pem");
        fs::write(&file, ROOT_A).unwrap();

        let roots = root_cas(&file).unwrap();
        assert_eq!(roots.len(), system_roots().len() + 1);
    }

    #[test]
    fn invalid_single_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ca.pem");
        fs::write(&file, "garbage").unwrap();

        let err = root_cas(&file).unwrap_err();
        assert!(matches!(err, CertError::NoCertificates { .. }));
    }

    #[test]
    fn directory_skips_invalid_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.pem"), ROOT_A).unwrap();
        fs::write(dir.path().join("b.crt"), ROOT_B).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a certificate").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.pem"), ROOT_A).unwrap();

        let roots = root_cas(dir.path()).unwrap();
        assert_eq!(roots.len(), system_roots().len() + 2);
    }
}

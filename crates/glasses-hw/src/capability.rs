//! Face-tracking capability detection.
//!
//! Face tracking needs a camera. Candidate V4L2 nodes are found under
//! `/sys/class/video4linux` (primary nodes only, sysfs `index` 0, with a
//! matching `/dev/videoN`), then each candidate is asked for its
//! capabilities. Only nodes advertising `VIDEO_CAPTURE` count; codecs and
//! other memory-to-memory or output nodes are skipped.

use std::path::{Path, PathBuf};
use v4l::capability::Flags;
use v4l::device::Device;

pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/video4linux";
pub const DEFAULT_DEV_ROOT: &str = "/dev";

/// Advisory shown when the host cannot track faces.
pub const UNSUPPORTED_ADVISORY: &str =
    "Sorry, face tracking configuration is not supported by your device.";

/// Host capability query. Implementations must not have side effects.
pub trait CapabilityProbe {
    fn supports_face_tracking(&self) -> bool;
}

/// Capability fixed by configuration, bypassing hardware detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedProbe(pub bool);

impl CapabilityProbe for FixedProbe {
    fn supports_face_tracking(&self) -> bool {
        self.0
    }
}

/// Capabilities reported by a V4L2 node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeCaps {
    pub card: String,
    pub driver: String,
    pub bus: String,
    pub video_capture: bool,
}

/// Capability lookup for a device node.
pub trait CapsQuery {
    /// Returns `None` if the node cannot be opened or queried.
    fn query(&self, path: &Path) -> Option<NodeCaps>;
}

/// `VIDIOC_QUERYCAP` through the `v4l` crate. Opens the node but never
/// starts a stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct V4l2Caps;

impl CapsQuery for V4l2Caps {
    fn query(&self, path: &Path) -> Option<NodeCaps> {
        let device = match Device::with_path(path) {
            Ok(device) => device,
            Err(e) => {
                tracing::debug!(node = %path.display(), error = %e, "cannot open node");
                return None;
            }
        };
        let caps = match device.query_caps() {
            Ok(caps) => caps,
            Err(e) => {
                tracing::debug!(node = %path.display(), error = %e, "QUERYCAP failed");
                return None;
            }
        };
        Some(NodeCaps {
            video_capture: caps.capabilities.contains(Flags::VIDEO_CAPTURE),
            card: caps.card,
            driver: caps.driver,
            bus: caps.bus,
        })
    }
}

/// A V4L2 capture node usable for face tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoNode {
    /// Device node path (e.g., "/dev/video0").
    pub path: PathBuf,
    /// Card name reported by the driver.
    pub name: String,
    pub driver: String,
    pub bus: String,
}

/// Probe that scans sysfs for V4L2 nodes and keeps the capture-capable ones.
#[derive(Debug, Clone)]
pub struct SysfsProbe<Q = V4l2Caps> {
    sysfs_root: PathBuf,
    dev_root: PathBuf,
    caps: Q,
}

impl Default for SysfsProbe {
    fn default() -> Self {
        Self::new(DEFAULT_SYSFS_ROOT, DEFAULT_DEV_ROOT)
    }
}

impl SysfsProbe {
    pub fn new(sysfs_root: impl Into<PathBuf>, dev_root: impl Into<PathBuf>) -> Self {
        Self::with_caps_query(sysfs_root, dev_root, V4l2Caps)
    }
}

impl<Q: CapsQuery> SysfsProbe<Q> {
    pub fn with_caps_query(
        sysfs_root: impl Into<PathBuf>,
        dev_root: impl Into<PathBuf>,
        caps: Q,
    ) -> Self {
        Self {
            sysfs_root: sysfs_root.into(),
            dev_root: dev_root.into(),
            caps,
        }
    }

    /// List capture nodes, sorted by device path.
    ///
    /// Returns an empty list if sysfs is unavailable.
    pub fn capture_nodes(&self) -> Vec<VideoNode> {
        let entries = match std::fs::read_dir(&self.sysfs_root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(root = %self.sysfs_root.display(), error = %e, "video4linux not readable");
                return Vec::new();
            }
        };

        let mut nodes: Vec<VideoNode> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let dev_name = entry.file_name().to_str()?.to_string();
                if !dev_name.starts_with("video") {
                    return None;
                }
                self.capture_node(&entry.path(), &dev_name)
            })
            .collect();

        nodes.sort_by(|a, b| a.path.cmp(&b.path));
        nodes
    }

    fn capture_node(&self, sysfs_dir: &Path, dev_name: &str) -> Option<VideoNode> {
        // Kernels without the attribute expose a single node per device.
        if let Ok(index) = std::fs::read_to_string(sysfs_dir.join("index")) {
            if index.trim() != "0" {
                tracing::debug!(node = dev_name, index = index.trim(), "skipping secondary node");
                return None;
            }
        }

        let path = self.dev_root.join(dev_name);
        if !path.exists() {
            tracing::debug!(node = dev_name, "no device node");
            return None;
        }

        let caps = self.caps.query(&path)?;
        if !caps.video_capture {
            tracing::debug!(node = dev_name, driver = %caps.driver, "not a capture device");
            return None;
        }

        let name = if caps.card.is_empty() {
            std::fs::read_to_string(sysfs_dir.join("name"))
                .map(|n| n.trim().to_string())
                .unwrap_or_else(|_| dev_name.to_string())
        } else {
            caps.card
        };

        Some(VideoNode {
            path,
            name,
            driver: caps.driver,
            bus: caps.bus,
        })
    }
}

impl<Q: CapsQuery> CapabilityProbe for SysfsProbe<Q> {
    fn supports_face_tracking(&self) -> bool {
        let nodes = self.capture_nodes();
        tracing::debug!(count = nodes.len(), "capture nodes found");
        !nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    /// Caps keyed by device node file name.
    #[derive(Default)]
    struct FakeCaps(HashMap<String, NodeCaps>);

    impl CapsQuery for FakeCaps {
        fn query(&self, path: &Path) -> Option<NodeCaps> {
            let name = path.file_name()?.to_str()?;
            self.0.get(name).cloned()
        }
    }

    fn caps(card: &str, driver: &str, video_capture: bool) -> NodeCaps {
        NodeCaps {
            card: card.into(),
            driver: driver.into(),
            bus: "usb-0000:00:14.0-5".into(),
            video_capture,
        }
    }

    /// Scratch sysfs + dev tree with fake node capabilities.
    struct Fixture {
        dir: TempDir,
        caps: FakeCaps,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            fs::create_dir(dir.path().join("sys")).unwrap();
            fs::create_dir(dir.path().join("dev")).unwrap();
            Self {
                dir,
                caps: FakeCaps::default(),
            }
        }

        fn add_node(&mut self, dev_name: &str, index: Option<&str>, caps: Option<NodeCaps>) {
            let sys = self.dir.path().join("sys").join(dev_name);
            fs::create_dir_all(&sys).unwrap();
            fs::write(sys.join("name"), format!("{dev_name}-sysfs\n")).unwrap();
            if let Some(index) = index {
                fs::write(sys.join("index"), format!("{index}\n")).unwrap();
            }
            if let Some(caps) = caps {
                fs::write(self.dir.path().join("dev").join(dev_name), b"").unwrap();
                self.caps.0.insert(dev_name.to_string(), caps);
            }
        }

        fn probe(self) -> (SysfsProbe<FakeCaps>, TempDir) {
            let probe = SysfsProbe::with_caps_query(
                self.dir.path().join("sys"),
                self.dir.path().join("dev"),
                self.caps,
            );
            (probe, self.dir)
        }
    }

    #[test]
    fn test_fixed_probe() {
        assert!(FixedProbe(true).supports_face_tracking());
        assert!(!FixedProbe(false).supports_face_tracking());
    }

    #[test]
    fn test_missing_sysfs_unsupported() {
        let probe = SysfsProbe::new("/nonexistent/video4linux", "/nonexistent/dev");
        assert!(probe.capture_nodes().is_empty());
        assert!(!probe.supports_face_tracking());
    }

    #[test]
    fn test_primary_capture_node_supported() {
        let mut fx = Fixture::new();
        fx.add_node("video0", Some("0"), Some(caps("Integrated Camera", "uvcvideo", true)));
        fx.add_node("video1", Some("1"), Some(caps("Integrated Camera", "uvcvideo", true)));

        let (probe, _dir) = fx.probe();
        let nodes = probe.capture_nodes();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "Integrated Camera");
        assert_eq!(nodes[0].driver, "uvcvideo");
        assert!(nodes[0].path.ends_with("video0"));
        assert!(probe.supports_face_tracking());
    }

    #[test]
    fn test_codec_only_host_unsupported() {
        let mut fx = Fixture::new();
        fx.add_node(
            "video10",
            Some("0"),
            Some(caps("bcm2835-codec-decode", "bcm2835-codec", false)),
        );

        let (probe, _dir) = fx.probe();
        assert!(probe.capture_nodes().is_empty());
        assert!(!probe.supports_face_tracking());
    }

    #[test]
    fn test_codec_skipped_next_to_camera() {
        let mut fx = Fixture::new();
        fx.add_node("video0", Some("0"), Some(caps("USB Camera", "uvcvideo", true)));
        fx.add_node("video10", Some("0"), Some(caps("bcm2835-codec-decode", "bcm2835-codec", false)));

        let (probe, _dir) = fx.probe();
        let nodes = probe.capture_nodes();
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].path.ends_with("video0"));
    }

    #[test]
    fn test_node_without_dev_entry_ignored() {
        let mut fx = Fixture::new();
        fx.add_node("video0", Some("0"), None);
        let (probe, _dir) = fx.probe();
        assert!(!probe.supports_face_tracking());
    }

    #[test]
    fn test_unqueryable_node_ignored() {
        let mut fx = Fixture::new();
        fx.add_node("video0", Some("0"), None);
        fs::write(fx.dir.path().join("dev").join("video0"), b"").unwrap();
        let (probe, _dir) = fx.probe();
        assert!(probe.capture_nodes().is_empty());
    }

    #[test]
    fn test_node_without_index_counted() {
        let mut fx = Fixture::new();
        fx.add_node("video3", None, Some(caps("", "uvcvideo", true)));
        fx.add_node("vbi0", None, Some(caps("Teletext", "bttv", true)));

        let (probe, _dir) = fx.probe();
        let nodes = probe.capture_nodes();
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].path.ends_with("video3"));
        // Empty card name falls back to sysfs.
        assert_eq!(nodes[0].name, "video3-sysfs");
    }
}

use std::thread;

use sysinfo::System;

use crate::disk_info;

/// Point-in-time host utilization. `None` means the field could not be read;
/// capture itself never fails.
#[derive(Debug, Clone, Default)]
pub struct SystemMetrics {
    pub os: Option<String>,
    pub cpu_percent: Option<f32>,
    pub ram_percent: Option<f32>,
    pub disk_percent: Option<f32>,
}

impl SystemMetrics {
    pub fn os_label(&self) -> String {
        self.os.clone().unwrap_or_else(|| "N/A".to_string())
    }

    pub fn cpu_label(&self) -> String {
        percent_label(self.cpu_percent)
    }

    pub fn ram_label(&self) -> String {
        percent_label(self.ram_percent)
    }

    pub fn disk_label(&self) -> String {
        percent_label(self.disk_percent)
    }
}

fn percent_label(value: Option<f32>) -> String {
    match value {
        Some(pct) => format!("{pct:.1}%"),
        None => "N/A".to_string(),
    }
}

/// Best-effort snapshot of OS identity, CPU, RAM and root-volume disk usage.
/// CPU is measured across two samples spaced by the minimum interval the
/// backend supports, so this call blocks briefly.
pub fn capture() -> SystemMetrics {
    let mut sys = System::new();

    sys.refresh_cpu_usage();
    thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    sys.refresh_cpu_usage();
    let cpu_percent = (!sys.cpus().is_empty()).then(|| sys.global_cpu_usage());

    sys.refresh_memory();
    let total = sys.total_memory();
    let ram_percent = (total > 0).then(|| (sys.used_memory() as f64 / total as f64 * 100.0) as f32);

    let disk_percent = disk_info::get_disk_info().map(|d| d.usage_percent() * 100.0);

    SystemMetrics {
        os: os_identity(),
        cpu_percent,
        ram_percent,
        disk_percent,
    }
}

fn os_identity() -> Option<String> {
    match (System::name(), System::os_version()) {
        (Some(name), Some(version)) => Some(format!("{name} {version}")),
        (Some(name), None) => Some(name),
        (None, Some(version)) => Some(version),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_reports_fields_in_range() {
        let metrics = capture();
        if let Some(cpu) = metrics.cpu_percent {
            assert!(cpu >= 0.0 && cpu.is_finite());
        }
        if let Some(ram) = metrics.ram_percent {
            assert!((0.0..=100.0).contains(&ram));
        }
        if let Some(disk) = metrics.disk_percent {
            assert!((0.0..=100.0).contains(&disk));
        }
        assert!(metrics.ram_percent.is_some());
    }

    #[test]
    fn unknown_fields_render_as_na() {
        let metrics = SystemMetrics::default();
        assert_eq!(metrics.os_label(), "N/A");
        assert_eq!(metrics.cpu_label(), "N/A");
        assert_eq!(metrics.ram_label(), "N/A");
        assert_eq!(metrics.disk_label(), "N/A");
    }

    #[test]
    fn present_fields_render_with_one_decimal() {
        let metrics = SystemMetrics {
            os: Some("TestOS 1.0".to_string()),
            cpu_percent: Some(12.34),
            ram_percent: Some(56.0),
            disk_percent: Some(99.96),
        };
        assert_eq!(metrics.os_label(), "TestOS 1.0");
        assert_eq!(metrics.cpu_label(), "12.3%");
        assert_eq!(metrics.ram_label(), "56.0%");
        assert_eq!(metrics.disk_label(), "100.0%");
    }
}

use std::thread;
use std::time::Duration;

use sysinfo::System;

use super::{Command, CommandError, Context, Outcome};

const SIZE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Default CPU sampling window.
pub const DEFAULT_SAMPLE: Duration = Duration::from_millis(200);

/// CPU, memory and process-count snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCommand {
    sample: Duration,
}

impl Default for StatusCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusCommand {
    pub fn new() -> Self {
        Self {
            sample: DEFAULT_SAMPLE,
        }
    }

    pub fn with_sample(sample: Duration) -> Self {
        Self { sample }
    }
}

impl Command for StatusCommand {
    fn execute(&self, ctx: &Context<'_>) -> Result<Outcome, CommandError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(CommandError::Status(
                "resource sampling is not supported on this platform".to_string(),
            ));
        }

        let mut system = System::new();

        // CPU usage is a delta between two refreshes.
        system.refresh_cpu();
        thread::sleep(self.sample.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
        system.refresh_cpu();
        let cpu = system.global_cpu_info().cpu_usage();

        system.refresh_memory();
        let total = system.total_memory();
        let used = system.used_memory();
        if total == 0 {
            return Err(CommandError::Status(
                "total memory reported as zero".to_string(),
            ));
        }
        let memory_percent = used as f64 / total as f64 * 100.0;

        system.refresh_processes();
        let processes = system.processes().len();

        let lines = [
            format!("CPU: {:.1}%", cpu),
            format!(
                "Memory: {:.1}% used ({} / {})",
                memory_percent,
                human_size(used),
                human_size(total)
            ),
            format!("Processes: {}", processes),
        ];
        Ok(ctx.stay(lines.join("\n")))
    }
}

/// Base-1024 size with one decimal, e.g. `12.3 MB`.
pub fn human_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, SIZE_UNITS[unit])
}

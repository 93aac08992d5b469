pub mod backup_record;
pub mod report;
pub mod scan_event;

pub use backup_record::BackupRecord;
pub use report::{CompactionReport, DatabaseInfo, HealthReport, IntegrityReport, RestoreReport, Stats};
pub use scan_event::{DEFAULT_USER, ScanEvent};

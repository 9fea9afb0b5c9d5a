mod report_dto;

pub use report_dto::{ChargeCatalogDto, ReportSnapshotDto};

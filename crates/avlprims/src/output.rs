use std::io::IsTerminal;

use avlprims_codec::{Frame, Packet, Record};
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    kind: &'static str,
    codec: &'static str,
    codec_id: u8,
    record_count: u8,
    consumed: usize,
    records: &'a [Record],
}

#[derive(Serialize)]
struct ImeiOutput<'a> {
    kind: &'static str,
    imei: Option<&'a str>,
    size: usize,
}

#[derive(Serialize)]
struct ClassifyOutput {
    imei: bool,
    size: usize,
}

pub fn print_frame(frame: &Frame, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = FrameOutput {
                kind: "avl",
                codec: frame.codec().name(),
                codec_id: frame.codec_id,
                record_count: frame.record_count,
                consumed: frame.consumed,
                records: &frame.records,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec![
                    "TIMESTAMP",
                    "PRI",
                    "LAT",
                    "LON",
                    "ALT",
                    "ANGLE",
                    "SAT",
                    "SPEED",
                    "EVENT",
                    "IO",
                ]);
            for record in &frame.records {
                table.add_row(vec![
                    record.timestamp.as_millis().to_string(),
                    record.priority.to_string(),
                    record.gps.latitude.to_string(),
                    record.gps.longitude.to_string(),
                    record.gps.altitude.to_string(),
                    record.gps.angle.to_string(),
                    record.gps.satellites.to_string(),
                    record.gps.speed.to_string(),
                    record.io.event_io_id.to_string(),
                    io_summary(record),
                ]);
            }
            println!(
                "{} (0x{:02X}), {} record(s), {} bytes",
                frame.codec().name(),
                frame.codec_id,
                frame.record_count,
                frame.consumed
            );
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "codec={} (0x{:02X}) records={} consumed={}",
                frame.codec().name(),
                frame.codec_id,
                frame.record_count,
                frame.consumed
            );
            for record in &frame.records {
                println!(
                    "  t={} pri={} lat={} lon={} alt={} angle={} sat={} speed={} event={} io=[{}]",
                    record.timestamp.as_millis(),
                    record.priority,
                    record.gps.latitude,
                    record.gps.longitude,
                    record.gps.altitude,
                    record.gps.angle,
                    record.gps.satellites,
                    record.gps.speed,
                    record.io.event_io_id,
                    io_summary(record)
                );
            }
        }
    }
}

pub fn print_packet(packet: &Packet, format: OutputFormat) {
    match packet {
        Packet::Avl(frame) => print_frame(frame, format),
        Packet::Imei(raw) => match format {
            OutputFormat::Json => {
                let out = ImeiOutput {
                    kind: "imei",
                    imei: packet.imei(),
                    size: raw.len(),
                };
                println!(
                    "{}",
                    serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
                );
            }
            OutputFormat::Table | OutputFormat::Pretty => {
                println!(
                    "imei={} size={}",
                    packet.imei().unwrap_or("<invalid>"),
                    raw.len()
                );
            }
        },
    }
}

pub fn print_classification(imei: bool, size: usize, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = ClassifyOutput { imei, size };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            let kind = if imei { "imei/unknown" } else { "avl" };
            println!("kind={kind} size={size}");
        }
    }
}

fn io_summary(record: &Record) -> String {
    record
        .io
        .elements
        .iter()
        .map(|(id, value)| format!("{id}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}

//! Size-targeting batch loop

use crate::estimate;
use crate::generator::RowGenerator;
use crate::schema::Record;
use anyhow::Result;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

/// Progress is reported this many times over a full projected run
const PROGRESS_STEPS: u64 = 20;

/// Destination for generated rows
pub trait RowSink {
    /// Append a batch after the rows already written
    fn append_rows(&mut self, rows: &[Record]) -> Result<()>;
}

/// Limits of one generation session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationPlan {
    pub target_bytes: u64,
    pub max_rows: u64,
    pub batch_size: usize,
}

impl GenerationPlan {
    pub fn new(target_mb: f64, max_rows: u64, batch_size: usize) -> Self {
        Self {
            target_bytes: estimate::target_bytes(target_mb),
            max_rows,
            batch_size,
        }
    }
}

/// Which threshold ended generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    MaxRows,
    TargetSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationOutcome {
    pub rows: u64,
    pub columns: usize,
    pub estimated_bytes: u64,
    pub projected_rows: u64,
    pub stop_reason: StopReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub rows: u64,
    pub projected_rows: u64,
}

impl Progress {
    /// Share of the projected rows done, in percent
    pub fn percent(&self) -> f64 {
        if self.projected_rows == 0 {
            return 100.0;
        }
        self.rows as f64 / self.projected_rows as f64 * 100.0
    }
}

/// Generate rows into `sink` until the row cap or the size budget is hit.
///
/// Rows are produced in batches; the size budget is only checked between
/// batches, so the final count is a multiple of the batch size unless the
/// row cap cut the last batch short.
pub fn generate_rows<R, S, F>(
    plan: &GenerationPlan,
    generator: &mut RowGenerator<R>,
    sink: &mut S,
    mut on_progress: F,
) -> Result<GenerationOutcome>
where
    R: Rng,
    S: RowSink + ?Sized,
    F: FnMut(Progress),
{
    let columns = generator.schema().column_count();
    let projected_rows = estimate::projected_rows(plan.target_bytes, columns, plan.max_rows);
    let progress_interval = (projected_rows / PROGRESS_STEPS).max(1);
    let batch_size = plan.batch_size.max(1);

    let mut rows: u64 = 0;
    let mut estimated_bytes: u64 = 0;
    let mut batch = Vec::with_capacity(batch_size);

    let stop_reason = loop {
        if rows >= plan.max_rows {
            break StopReason::MaxRows;
        }

        batch.clear();
        while batch.len() < batch_size && rows < plan.max_rows {
            rows += 1;
            batch.push(generator.record(rows));
            if rows % progress_interval == 0 {
                on_progress(Progress {
                    rows,
                    projected_rows,
                });
            }
        }

        sink.append_rows(&batch)?;
        estimated_bytes = estimate::estimated_bytes(rows, columns);
        debug!(rows, estimated_bytes, "appended batch of {} rows", batch.len());

        if estimated_bytes >= plan.target_bytes {
            break StopReason::TargetSize;
        }
    };

    Ok(GenerationOutcome {
        rows,
        columns,
        estimated_bytes,
        projected_rows,
        stop_reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldValue, SchemaKind};

    #[derive(Default)]
    struct MemorySink {
        rows: Vec<Record>,
        batches: Vec<usize>,
    }

    impl RowSink for MemorySink {
        fn append_rows(&mut self, rows: &[Record]) -> Result<()> {
            self.batches.push(rows.len());
            self.rows.extend_from_slice(rows);
            Ok(())
        }
    }

    struct FailingSink;

    impl RowSink for FailingSink {
        fn append_rows(&mut self, _rows: &[Record]) -> Result<()> {
            anyhow::bail!("disk full")
        }
    }

    fn run(
        plan: GenerationPlan,
        schema: SchemaKind,
    ) -> (GenerationOutcome, MemorySink, Vec<Progress>) {
        let mut generator = RowGenerator::new(schema, Some(1));
        let mut sink = MemorySink::default();
        let mut events = Vec::new();
        let outcome = generate_rows(&plan, &mut generator, &mut sink, |p| events.push(p)).unwrap();
        (outcome, sink, events)
    }

    #[test]
    fn test_row_cap_stops_generation() {
        let plan = GenerationPlan::new(1.0, 2500, 1000);
        let (outcome, sink, _) = run(plan, SchemaKind::Person);

        assert_eq!(outcome.rows, 2500);
        assert_eq!(outcome.stop_reason, StopReason::MaxRows);
        assert_eq!(sink.rows.len() as u64, outcome.rows);
        assert_eq!(sink.batches, vec![1000, 1000, 500]);
    }

    #[test]
    fn test_size_budget_stops_on_batch_boundary() {
        // 1MB at 200 bytes per row needs 5243 rows, so the sixth batch crosses
        let plan = GenerationPlan::new(1.0, 1_000_000, 1000);
        let (outcome, sink, _) = run(plan, SchemaKind::Transaction);

        assert_eq!(outcome.stop_reason, StopReason::TargetSize);
        assert_eq!(outcome.rows, 6000);
        assert_eq!(outcome.estimated_bytes, 1_200_000);
        assert_eq!(sink.batches.len(), 6);
        assert_eq!(sink.rows.len(), 6000);
    }

    #[test]
    fn test_both_limits_in_same_batch_reports_size() {
        let plan = GenerationPlan::new(1.0, 6000, 1000);
        let (outcome, _, _) = run(plan, SchemaKind::Sale);
        assert_eq!(outcome.rows, 6000);
        assert_eq!(outcome.stop_reason, StopReason::TargetSize);
    }

    #[test]
    fn test_rows_are_numbered_from_one() {
        let plan = GenerationPlan::new(1.0, 3, 2);
        let (_, sink, _) = run(plan, SchemaKind::Sale);
        let ids: Vec<_> = sink.rows.iter().map(|r| r.get("orderId").cloned()).collect();
        assert_eq!(
            ids,
            vec![
                Some(FieldValue::Text("ORD00000001".into())),
                Some(FieldValue::Text("ORD00000002".into())),
                Some(FieldValue::Text("ORD00000003".into())),
            ]
        );
        assert_eq!(sink.batches, vec![2, 1]);
    }

    #[test]
    fn test_never_exceeds_row_cap() {
        for max_rows in [1, 999, 1000, 1001, 4321] {
            for batch_size in [1, 7, 1000] {
                let plan = GenerationPlan::new(1000.0, max_rows, batch_size);
                let (outcome, sink, _) = run(plan, SchemaKind::Person);
                assert_eq!(outcome.rows, max_rows);
                assert_eq!(sink.rows.len() as u64, max_rows);
            }
        }
    }

    #[test]
    fn test_zero_row_cap_writes_nothing() {
        let plan = GenerationPlan::new(1.0, 0, 1000);
        let (outcome, sink, events) = run(plan, SchemaKind::Person);
        assert_eq!(outcome.rows, 0);
        assert_eq!(outcome.stop_reason, StopReason::MaxRows);
        assert!(sink.batches.is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn test_progress_every_five_percent() {
        let plan = GenerationPlan::new(1.0, 2000, 1000);
        let (outcome, _, events) = run(plan, SchemaKind::Person);

        assert_eq!(outcome.projected_rows, 2000);
        assert_eq!(events.len(), 20);
        assert_eq!(events[0].rows, 100);
        assert_eq!(events.last().map(|p| p.percent()), Some(100.0));
    }

    #[test]
    fn test_sink_errors_propagate() {
        let plan = GenerationPlan::new(1.0, 10, 5);
        let mut generator = RowGenerator::new(SchemaKind::Person, None);
        let err = generate_rows(&plan, &mut generator, &mut FailingSink, |_| {}).unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }
}

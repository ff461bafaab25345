//! `trackline timeline` - render the tracking timeline for an order.

use std::io::Write;

use chrono::FixedOffset;
use trackline_core::OrderRecord;
use trackline_core::timeline::{
    DeliveryEstimator, StepState, TimelineBuilder, TimelineStep, TrackingSummary,
};

use crate::OutputFormat;
use crate::error::Result;

/// Build the summary for an order and write it in the requested format.
///
/// # Errors
///
/// Returns an error if the output cannot be encoded or written.
pub fn run(
    order: &OrderRecord,
    builder: &TimelineBuilder,
    offset: FixedOffset,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let summary = TrackingSummary::build(builder, &DeliveryEstimator::new(offset), order);

    tracing::debug!(
        active_index = summary.timeline.active_index(),
        completed = summary.timeline.completed_count(),
        policy = %builder.duplicate_policy(),
        "Built timeline"
    );

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &summary)?;
            writeln!(out)?;
        }
        OutputFormat::Text => write_text(&summary, offset, out)?,
    }
    Ok(())
}

fn write_text(
    summary: &TrackingSummary,
    offset: FixedOffset,
    out: &mut impl Write,
) -> std::io::Result<()> {
    let order = summary.order_id.as_ref().map_or("(unknown)", |id| id.as_str());
    match &summary.tracking_number {
        Some(number) => writeln!(out, "Order {order} (tracking {number})")?,
        None => writeln!(out, "Order {order}")?,
    }

    for step in &summary.timeline {
        writeln!(out, "{}", step_line(step, offset))?;
    }

    writeln!(
        out,
        "Estimated delivery: {}",
        summary.estimated_delivery.as_deref().unwrap_or("unavailable")
    )
}

/// One timeline row: marker, label, and event detail if any.
fn step_line(step: &TimelineStep, offset: FixedOffset) -> String {
    let marker = match step.state {
        StepState::Completed => "[x]",
        StepState::Active => "[>]",
        StepState::Pending => "[ ]",
    };

    let mut line = format!("  {marker} {:<20}", step.step.label);

    if let Some(event) = step.matched_event() {
        let mut detail = Vec::new();
        if let Some(ts) = event.timestamp {
            detail.push(
                ts.with_timezone(&offset)
                    .format("%b %d, %Y %H:%M")
                    .to_string(),
            );
        }
        if let Some(message) = &event.message {
            detail.push(message.clone());
        }
        if let Some(location) = &event.location {
            detail.push(format!("@ {location}"));
        }
        if step.event.as_ref().is_some_and(|e| e.is_synthesized()) {
            detail.push("(inferred)".to_string());
        }
        line.push(' ');
        line.push_str(&detail.join("  "));
    }

    line.trim_end().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Offset, TimeZone, Utc};
    use trackline_core::normalize::order_from_value;

    use super::*;

    fn render(payload: &serde_json::Value, format: OutputFormat) -> String {
        let order = order_from_value(payload).unwrap();
        let mut out = Vec::new();
        run(
            &order,
            &TimelineBuilder::standard(),
            Utc.fix(),
            format,
            &mut out,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_output() {
        let payload = serde_json::json!({
            "id": "ORD-7",
            "trackingNumber": "TRK7",
            "status": "processing",
            "paymentStatus": "paid",
            "paidAt": "2024-01-10T09:00:00Z",
            "createdAt": "2024-01-10T08:00:00Z",
            "shippingType": "express",
            "trackingHistory": [
                { "status": "processing", "message": "Packing", "location": "Warehouse 2" }
            ]
        });
        let text = render(&payload, OutputFormat::Text);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.first().copied(), Some("Order ORD-7 (tracking TRK7)"));
        assert!(lines.iter().any(|l| l.starts_with("  [x] Payment Completed")
            && l.contains("Jan 10, 2024 09:00")
            && l.ends_with("(inferred)")));
        assert!(lines.iter().any(|l| l.starts_with("  [>] Processing")
            && l.contains("Packing")
            && l.contains("@ Warehouse 2")));
        assert!(lines.contains(&"  [ ] Delivered"));
        assert_eq!(
            lines.last().copied(),
            Some("Estimated delivery: Thursday, January 11, 2024")
        );
    }

    #[test]
    fn test_json_output() {
        let payload = serde_json::json!({ "order": { "id": "ORD-8", "status": "delivered" } });
        let json: serde_json::Value =
            serde_json::from_str(&render(&payload, OutputFormat::Json)).unwrap();

        assert_eq!(json["orderId"], "ORD-8");
        assert_eq!(json["timeline"]["activeIndex"], 6);
        assert_eq!(json["timeline"]["steps"].as_array().unwrap().len(), 7);
        assert_eq!(json["estimatedDelivery"], serde_json::Value::Null);
    }

    #[test]
    fn test_display_uses_offset() {
        let order = OrderRecord {
            status: Some("payment_completed".to_string()),
            tracking_history: vec![trackline_core::TrackingEvent::new("payment_completed")
                .with_timestamp(Utc.with_ymd_and_hms(2024, 1, 10, 23, 30, 0).unwrap())],
            ..OrderRecord::default()
        };
        let timeline = TimelineBuilder::standard().build(&order.lifecycle());
        let step = timeline.steps().get(1).unwrap();

        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        assert!(step_line(step, offset).contains("Jan 11, 2024 01:30"));
    }
}

//! The text exposition format.
//!
//! # References
//!
//! - [Exposition formats](https://prometheus.io/docs/instrumenting/exposition_formats/)
use std::fmt;
use std::fmt::Write;

use crate::metric::{Family, Sample};

/// The content type of the text exposition format, for embedding HTTP
/// servers to put on the wire.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Renders collected families into the text exposition format.
///
/// Per family: a `# HELP` line (omitted entirely when the help text is
/// empty), a `# TYPE` line, one line per sample, and a terminating blank
/// line. Values render in fixed-point notation, never exponential; positive
/// infinity renders as `+Inf`.
///
/// Label values are escaped: backslash, double quote and line feed become
/// `\\`, `\"` and `\n`. Help texts escape backslash and line feed the same
/// way.
pub fn serialize(families: &[Family]) -> String {
    let mut buf = String::new();
    for family in families {
        if !family.help.is_empty() {
            buf.push_str("# HELP ");
            buf.push_str(&family.name);
            buf.push(' ');
            escape_help(&mut buf, &family.help);
            buf.push('\n');
        }
        buf.push_str("# TYPE ");
        buf.push_str(&family.name);
        buf.push(' ');
        write!(buf, "{}", family.kind).expect("Never fails");
        buf.push('\n');
        for sample in &family.samples {
            push_sample(&mut buf, sample);
        }
        buf.push('\n');
    }
    buf
}

fn push_sample(buf: &mut String, sample: &Sample) {
    buf.push_str(&sample.name);
    if !sample.label_values.is_empty() {
        buf.push('{');
        for (i, (name, value)) in sample
            .label_names
            .iter()
            .zip(sample.label_values.iter())
            .enumerate()
        {
            if i > 0 {
                buf.push(',');
            }
            buf.push_str(name);
            buf.push_str("=\"");
            escape_label_value(buf, value);
            buf.push('"');
        }
        buf.push('}');
    }
    buf.push(' ');
    write!(buf, "{}", SampleValue(sample.value)).expect("Never fails");
    buf.push('\n');
}

fn escape_label_value(buf: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '\\' => buf.push_str("\\\\"),
            '"' => buf.push_str("\\\""),
            '\n' => buf.push_str("\\n"),
            _ => buf.push(c),
        }
    }
}

fn escape_help(buf: &mut String, help: &str) {
    for c in help.chars() {
        match c {
            '\\' => buf.push_str("\\\\"),
            '\n' => buf.push_str("\\n"),
            _ => buf.push(c),
        }
    }
}

/// Fixed-point rendering of sample values and bucket bounds.
///
/// `std::fmt` never falls back to exponential notation for finite floats,
/// so the only cases needing care are the non-finite ones.
pub(crate) struct SampleValue(pub f64);
impl fmt::Display for SampleValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_finite() {
            write!(f, "{}", self.0)
        } else if self.0.is_nan() {
            write!(f, "NaN")
        } else if self.0.is_sign_positive() {
            write!(f, "+Inf")
        } else {
            write!(f, "-Inf")
        }
    }
}

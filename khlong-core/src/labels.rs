//! Label/value extraction from loosely formatted text.
//!
//! Statement headers write fields either inline (`Account No: 123-4-56789-0`)
//! or with the value on the following line. The scanner walks lines with a
//! two-state machine: no pending label, or a label that still awaits its value.

/// Scanner state between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelState<L> {
    NoLabel,
    AwaitingValue(L),
}

#[derive(Debug, Clone, Copy)]
struct Hit<L> {
    start: usize,
    end: usize,
    label: L,
}

/// Trim whitespace and the separators that follow a label.
fn clean_value(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == ':' || c == '：')
}

/// Find non-overlapping label keywords in one line, earliest first.
/// At the same offset the longest keyword wins.
fn find_hits<L: Copy>(line: &str, labels: &[(L, &[&str])]) -> Vec<Hit<L>> {
    // ASCII lowercasing keeps byte offsets valid for slicing the original line.
    let lowered = line.to_ascii_lowercase();
    let mut hits = Vec::new();

    for (label, keywords) in labels {
        for kw in keywords.iter() {
            let kw = kw.to_ascii_lowercase();
            if kw.is_empty() {
                continue;
            }
            for (start, _) in lowered.match_indices(&kw) {
                hits.push(Hit {
                    start,
                    end: start + kw.len(),
                    label: *label,
                });
            }
        }
    }

    hits.sort_by(|a, b| a.start.cmp(&b.start).then((b.end - b.start).cmp(&(a.end - a.start))));

    let mut out: Vec<Hit<L>> = Vec::new();
    for hit in hits {
        match out.last() {
            Some(prev) if hit.start < prev.end => {}
            _ => out.push(hit),
        }
    }
    out
}

/// Scan `text` for labeled values, in document order.
///
/// `labels` maps each label to the keywords that introduce it; keyword
/// matching ignores ASCII case. A label with nothing after it on its line
/// takes the next non-empty line as its value, unless that line opens with
/// another label.
pub fn scan_labeled_values<L: Copy + Eq>(
    text: &str,
    labels: &[(L, &[&str])],
) -> Vec<(L, String)> {
    let mut state = LabelState::NoLabel;
    let mut out = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let hits = find_hits(line, labels);

        if let LabelState::AwaitingValue(pending) = state {
            let head = match hits.first() {
                Some(first) => &line[..first.start],
                None => line,
            };
            let value = clean_value(head);
            if !value.is_empty() {
                out.push((pending, value.to_string()));
            }
            state = LabelState::NoLabel;
        }

        for (i, hit) in hits.iter().enumerate() {
            let stop = hits.get(i + 1).map(|next| next.start).unwrap_or(line.len());
            let value = clean_value(&line[hit.end..stop]);
            if !value.is_empty() {
                out.push((hit.label, value.to_string()));
            } else if i + 1 == hits.len() {
                state = LabelState::AwaitingValue(hit.label);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Account,
        Name,
        Period,
    }

    const LABELS: &[(Field, &[&str])] = &[
        (Field::Account, &["เลขที่บัญชี", "Account No"]),
        (Field::Name, &["ชื่อบัญชี", "Account Name"]),
        (Field::Period, &["Statement Period", "Period"]),
    ];

    #[test]
    fn test_inline_values() {
        let got = scan_labeled_values("Account No: 123-4-56789-0\nชื่อบัญชี : สมชาย ใจดี", LABELS);
        assert_eq!(
            got,
            vec![
                (Field::Account, "123-4-56789-0".to_string()),
                (Field::Name, "สมชาย ใจดี".to_string()),
            ]
        );
    }

    #[test]
    fn test_value_on_next_line() {
        let got = scan_labeled_values("เลขที่บัญชี\n\n  987-6-54321-0  \nother prose", LABELS);
        assert_eq!(got, vec![(Field::Account, "987-6-54321-0".to_string())]);
    }

    #[test]
    fn test_two_labels_on_one_line() {
        let got = scan_labeled_values("ACCOUNT NO 111 account name Foo Bar", LABELS);
        assert_eq!(
            got,
            vec![
                (Field::Account, "111".to_string()),
                (Field::Name, "Foo Bar".to_string()),
            ]
        );
    }

    #[test]
    fn test_longest_keyword_wins() {
        let got = scan_labeled_values("Statement Period: 01/10/2025 - 31/10/2025", LABELS);
        assert_eq!(got, vec![(Field::Period, "01/10/2025 - 31/10/2025".to_string())]);
    }

    #[test]
    fn test_pending_label_replaced_by_next_label() {
        let got = scan_labeled_values("Account No:\nAccount Name: X", LABELS);
        assert_eq!(got, vec![(Field::Name, "X".to_string())]);
    }

    #[test]
    fn test_no_labels() {
        assert!(scan_labeled_values("just some text\n01-10-25 1.00", LABELS).is_empty());
    }
}

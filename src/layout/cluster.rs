use super::{Cluster, Span};

/// Splits spans sorted by start into overlap clusters in one pass.
///
/// A span joins the open cluster when it starts strictly before the latest
/// end seen in that cluster; otherwise the cluster is closed. Once closed, a
/// cluster can never be reopened: every later span starts at or after its
/// latest end.
pub fn cluster_spans<T: Ord + Copy>(spans: &[Span<T>]) -> Vec<Cluster<T>> {
    let mut clusters = Vec::new();
    let mut current: Vec<Span<T>> = Vec::new();
    let mut max_end: Option<T> = None;

    for span in spans {
        match max_end {
            Some(end) if span.start < end => {
                current.push(*span);
                max_end = Some(end.max(span.end));
            }
            _ => {
                if let Some(end) = max_end {
                    clusters.push(Cluster {
                        spans: std::mem::take(&mut current),
                        end,
                    });
                }
                current.push(*span);
                max_end = Some(span.end);
            }
        }
    }
    if let Some(end) = max_end {
        clusters.push(Cluster {
            spans: current,
            end,
        });
    }

    clusters
}

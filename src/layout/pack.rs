use super::{Cluster, PackedCluster, Span};

/// Gives each span the lowest column whose current holder has ended by the
/// span's start. Spans must be sorted by start.
///
/// Greedy first-fit over start order uses exactly as many columns as the
/// largest set of mutually overlapping spans.
pub fn pack_spans<T: Ord + Copy>(spans: &[Span<T>]) -> PackedCluster {
    let mut column_ends: Vec<T> = Vec::new();
    let mut columns = Vec::with_capacity(spans.len());

    for span in spans {
        let column = match column_ends.iter().position(|&end| end <= span.start) {
            Some(free) => {
                column_ends[free] = span.end;
                free
            }
            None => {
                column_ends.push(span.end);
                column_ends.len() - 1
            }
        };
        columns.push(column);
    }

    PackedCluster {
        columns,
        column_count: column_ends.len().max(1),
    }
}

pub fn pack_cluster<T: Ord + Copy>(cluster: &Cluster<T>) -> PackedCluster {
    pack_spans(&cluster.spans)
}

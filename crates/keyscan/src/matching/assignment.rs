//! Minimum-cost bipartite assignment (Hungarian method).

/// Assign rows to columns so that the summed cost is minimal.
///
/// `costs` is row-major and must be rectangular with finite entries. The
/// matrix is padded to a square with zero-cost dummy cells, so every row
/// gets a column when there are at least as many columns as rows. The
/// result holds, per row, the assigned column, or `None` for rows left over
/// when there are fewer columns than rows.
///
/// Uses the shortest augmenting path formulation with row and column
/// potentials and runs in O(n³) for `n = max(rows, columns)`.
pub fn optimal_assignment(costs: &[Vec<f64>]) -> Vec<Option<usize>> {
    let rows = costs.len();
    let cols = costs.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 {
        return vec![None; rows];
    }

    let n = rows.max(cols);
    let cost = |row: usize, col: usize| -> f64 {
        costs
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(0.0)
    };

    // 1-based; slot 0 is the virtual column an augmenting path starts from.
    let mut row_potential = vec![0.0; n + 1];
    let mut col_potential = vec![0.0; n + 1];
    let mut owner = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for row in 1..=n {
        owner[0] = row;
        let mut col = 0;
        let mut min_slack = vec![f64::INFINITY; n + 1];
        let mut visited = vec![false; n + 1];

        loop {
            visited[col] = true;
            let current = owner[col];
            let mut delta = f64::INFINITY;
            let mut next = 0;

            for j in 1..=n {
                if visited[j] {
                    continue;
                }
                let slack = cost(current - 1, j - 1) - row_potential[current] - col_potential[j];
                if slack < min_slack[j] {
                    min_slack[j] = slack;
                    way[j] = col;
                }
                if min_slack[j] < delta {
                    delta = min_slack[j];
                    next = j;
                }
            }

            for j in 0..=n {
                if visited[j] {
                    row_potential[owner[j]] += delta;
                    col_potential[j] -= delta;
                } else {
                    min_slack[j] -= delta;
                }
            }

            col = next;
            if owner[col] == 0 {
                break;
            }
        }

        // Flip the augmenting path back to the virtual column.
        while col != 0 {
            let previous = way[col];
            owner[col] = owner[previous];
            col = previous;
        }
    }

    let mut assignment = vec![None; rows];
    for (col, &row) in owner.iter().enumerate().skip(1) {
        if (1..=rows).contains(&row) && col <= cols {
            assignment[row - 1] = Some(col - 1);
        }
    }
    assignment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(costs: &[Vec<f64>], assignment: &[Option<usize>]) -> f64 {
        assignment
            .iter()
            .enumerate()
            .filter_map(|(row, col)| col.map(|c| costs[row][c]))
            .sum()
    }

    #[test]
    fn test_square_optimum() {
        let costs = vec![
            vec![4.0, 1.0, 3.0],
            vec![2.0, 0.0, 5.0],
            vec![3.0, 2.0, 2.0],
        ];

        let assignment = optimal_assignment(&costs);
        assert_eq!(assignment, vec![Some(1), Some(0), Some(2)]);
        assert_eq!(total(&costs, &assignment), 5.0);
    }

    #[test]
    fn test_beats_greedy_choice() {
        // Greedy takes (0, 0) first and is left with (1, 1): cost 0.9.
        let costs = vec![vec![0.0, 0.1], vec![0.1, 0.9]];
        assert_eq!(optimal_assignment(&costs), vec![Some(1), Some(0)]);
    }

    #[test]
    fn test_more_rows_than_columns() {
        let costs = vec![vec![0.9], vec![0.1], vec![0.5]];
        assert_eq!(optimal_assignment(&costs), vec![None, Some(0), None]);
    }

    #[test]
    fn test_more_columns_than_rows() {
        let costs = vec![vec![0.7, 0.2, 0.9]];
        assert_eq!(optimal_assignment(&costs), vec![Some(1)]);
    }

    #[test]
    fn test_empty_matrix() {
        assert!(optimal_assignment(&[]).is_empty());
        assert_eq!(optimal_assignment(&[vec![], vec![]]), vec![None, None]);
    }
}

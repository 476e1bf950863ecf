/// Index of the largest value. Ties go to the first index.
#[inline(always)]
pub fn argmax<'a>(values: impl IntoIterator<Item = &'a f64>) -> usize {
    let mut iter = values.into_iter();
    let mut max: f64 = match iter.next() {
        Some(v) => *v,
        None => return 0,
    };
    let mut result: usize = 0;
    for (i, v) in iter.enumerate() {
        if *v > max {
            max = *v;
            result = i + 1;
        }
    }
    result
}

#[inline(always)]
pub fn max<'a>(values: impl IntoIterator<Item = &'a f64>) -> f64 {
    values.into_iter().fold(f64::NEG_INFINITY, |acc, x| acc.max(*x))
}

pub fn moving_average(window: usize, vector: &[f64]) -> Vec<f64> {
    if window == 0 {
        return vector.to_vec();
    }
    let mut aux: usize = 0;
    let mut result: Vec<f64> = vec![];
    while aux < vector.len() {
        let end: usize = if aux + window < vector.len() {
            aux + window
        } else {
            vector.len()
        };
        let slice: &[f64] = &vector[aux..end];
        let r: f64 = slice.iter().sum();
        result.push(r / slice.len() as f64);
        aux = end;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn argmax_picks_first_on_ties() {
        assert_eq!(argmax(&[0.0, 0.0, 0.0, 0.0]), 0);
        assert_eq!(argmax(&[-1.0, 2.0, 2.0, 1.0]), 1);
        assert_eq!(argmax(&[-3.0, -2.0, -5.0, -1.0]), 3);
    }

    #[test]
    fn max_of_row() {
        assert_relative_eq!(max(&[-1.0, -0.5, -2.0]), -0.5);
    }

    #[test]
    fn moving_average_uses_chunk_length() {
        let avg = moving_average(2, &[1.0, 3.0, 5.0, 7.0, 9.0]);
        assert_eq!(avg.len(), 3);
        assert_relative_eq!(avg[0], 2.0);
        assert_relative_eq!(avg[1], 6.0);
        assert_relative_eq!(avg[2], 9.0);
    }

    #[test]
    fn moving_average_with_zero_window_is_identity() {
        assert_eq!(moving_average(0, &[1.0, 2.0]), vec![1.0, 2.0]);
    }
}

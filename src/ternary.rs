// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Conditional expression on one line.  `cargo fmt` splits an `if`
/// expression over five lines, which buries the border tables in the
/// gradient and cost code; `cq!(edge, a, b)` keeps each rule readable
/// in a single row.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $then: expr, $otherwise: expr) => {
        if $condition {
            $then
        } else {
            $otherwise
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn picks_a_branch() {
        assert_eq!(cq!(1 > 0, "left", "right"), "left");
        assert_eq!(cq!(1 < 0, "left", "right"), "right");
    }
}

/*
    skimsel

    Copyright 2024 The skimsel Authors

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    src/triggers.rs

    Triggers of interest and their resolved bit positions.
*/

/// Split a comma-separated trigger list into trimmed, non-empty names, preserving order.
pub fn parse_trigger_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerOfInterest {
    pub name: String,
    /// Bit position in the selection mask, or `None` if the name is not a known selection.
    pub bit:  Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerIndex {
    triggers: Vec<TriggerOfInterest>,
}

impl TriggerIndex {
    /// Resolve each name against `labels` by exact match. The first matching label wins, and a
    /// name that matches nothing is kept with no bit so that it never selects anything.
    pub fn resolve<N, L>(names: &[N], labels: &[L]) -> Self
    where
        N: AsRef<str>,
        L: AsRef<str>,
    {
        let triggers = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                TriggerOfInterest {
                    name: name.to_string(),
                    bit:  labels.iter().position(|label| label.as_ref() == name),
                }
            })
            .collect();

        TriggerIndex { triggers }
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TriggerOfInterest> {
        self.triggers.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TriggerOfInterest> {
        self.triggers.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.triggers.iter().map(|t| t.name.as_str())
    }

    /// Bit offsets in trigger order, with `-1` standing in for unresolved names.
    pub fn bit_offsets(&self) -> Vec<i32> {
        self.triggers
            .iter()
            .map(|t| t.bit.map_or(-1, |bit| bit as i32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_skips_empty_tokens() {
        assert_eq!(
            parse_trigger_list(" fOmega , fDoubleXi,, fTripleXi "),
            vec!["fOmega", "fDoubleXi", "fTripleXi"]
        );
        assert!(parse_trigger_list("").is_empty());
        assert!(parse_trigger_list(" , ").is_empty());
    }

    #[test]
    fn resolve_marks_unknown_names() {
        let labels = ["fHe", "fOmega", "fDoubleXi"];
        let index = TriggerIndex::resolve(&["fDoubleXi", "fUnknown", "fHe"], &labels);

        assert_eq!(index.len(), 3);
        assert_eq!(index.bit_offsets(), vec![2, -1, 0]);
        assert_eq!(index.get(1).map(|t| t.bit), Some(None));
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["fDoubleXi", "fUnknown", "fHe"]);
    }

    #[test]
    fn duplicate_names_resolve_independently() {
        let labels = ["A", "B"];
        let index = TriggerIndex::resolve(&["B", "B"], &labels);
        assert_eq!(index.bit_offsets(), vec![1, 1]);
    }

    #[test]
    fn matching_is_exact() {
        let labels = ["fOmega"];
        let index = TriggerIndex::resolve(&["fomega", "fOmega "], &labels);
        assert_eq!(index.bit_offsets(), vec![-1, -1]);
    }
}

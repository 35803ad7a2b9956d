//! Question sequences
//!
//! A [`QuestionSequence`] is a singly-linked chain of [`QuestionNode`]s that
//! exclusively owns every node. Sequences are built from fetched records,
//! randomized into independent sibling sequences, and released node by node.
//!
//! Node allocation goes through [`NodeAllocator`] so that every node handed
//! out is given back exactly once, including when a build fails halfway.

use std::fmt;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use super::arithmetic::{evaluate, OperatorCode};
use super::QuizError;

/// One arithmetic question: `num1 op num2`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// First operand
    pub num1: f64,
    /// Operator
    pub op: OperatorCode,
    /// Second operand
    pub num2: f64,
}

impl QuestionRecord {
    /// Create a question record
    pub fn new(num1: f64, op: OperatorCode, num2: f64) -> Self {
        Self { num1, op, num2 }
    }

    /// Create a question record from a raw operator code
    pub fn from_code(num1: f64, code: i64, num2: f64) -> Result<Self, QuizError> {
        Ok(Self::new(num1, OperatorCode::from_code(code)?, num2))
    }

    /// Correct answer of this question
    pub fn answer(&self) -> Result<f64, QuizError> {
        evaluate(self.num1, self.op, self.num2)
    }
}

impl fmt::Display for QuestionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.num1, self.op, self.num2)
    }
}

/// A node of a question sequence
#[derive(Debug)]
pub struct QuestionNode {
    /// Question carried by this node
    pub data: QuestionRecord,
    next: Option<Box<QuestionNode>>,
}

impl QuestionNode {
    /// Create an unlinked node
    pub fn new(data: QuestionRecord) -> Self {
        Self { data, next: None }
    }

    /// Successor of this node, if any
    pub fn next(&self) -> Option<&QuestionNode> {
        self.next.as_deref()
    }
}

/// Source of sequence nodes
///
/// `allocate` may fail with [`QuizError::AllocationFailed`]. Every node
/// obtained from `allocate` is passed back to `release` when the sequence
/// holding it is freed through the same allocator.
pub trait NodeAllocator {
    /// Allocate an unlinked node holding `data`
    fn allocate(&mut self, data: QuestionRecord) -> Result<Box<QuestionNode>, QuizError>;

    /// Release a node that has been unlinked from its sequence
    fn release(&mut self, node: Box<QuestionNode>) {
        drop(node);
    }
}

/// Allocator backed by the global heap
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapAllocator;

impl NodeAllocator for HeapAllocator {
    fn allocate(&mut self, data: QuestionRecord) -> Result<Box<QuestionNode>, QuizError> {
        Ok(Box::new(QuestionNode::new(data)))
    }
}

/// Ordered, exclusively owned chain of question nodes
#[derive(Debug, Default)]
pub struct QuestionSequence {
    head: Option<Box<QuestionNode>>,
    len: usize,
}

impl QuestionSequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the sequence has no head
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// First node, if any
    pub fn head(&self) -> Option<&QuestionNode> {
        self.head.as_deref()
    }

    /// Walk the nodes head to tail
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes { next: self.head() }
    }

    /// Walk the question data head to tail
    pub fn iter(&self) -> impl Iterator<Item = &QuestionRecord> + '_ {
        self.nodes().map(|node| &node.data)
    }

    /// Copy the question data out in sequence order
    pub fn to_records(&self) -> Vec<QuestionRecord> {
        self.iter().copied().collect()
    }

    /// Link freshly allocated nodes for `records`, in order
    ///
    /// On allocation failure every node already linked is released through
    /// `alloc` before the error is returned.
    fn chain_with<'a, I, A>(records: I, alloc: &mut A) -> Result<Self, QuizError>
    where
        I: IntoIterator<Item = &'a QuestionRecord>,
        A: NodeAllocator + ?Sized,
    {
        let mut sequence = QuestionSequence::new();
        let mut linked = 0;
        let mut failure = None;

        let mut tail = &mut sequence.head;
        for record in records {
            match alloc.allocate(*record) {
                Ok(node) => {
                    tail = &mut tail.insert(node).next;
                    linked += 1;
                }
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }
        sequence.len = linked;

        match failure {
            Some(err) => {
                sequence.release_with(alloc);
                Err(err)
            }
            None => Ok(sequence),
        }
    }

    /// Unlink and release every node head to tail
    fn release_with<A: NodeAllocator + ?Sized>(mut self, alloc: &mut A) {
        let mut current = self.head.take();
        self.len = 0;
        while let Some(mut node) = current {
            current = node.next.take();
            alloc.release(node);
        }
    }
}

impl Drop for QuestionSequence {
    fn drop(&mut self) {
        // Iterative so long chains cannot overflow the stack
        let mut current = self.head.take();
        while let Some(mut node) = current {
            current = node.next.take();
        }
    }
}

/// Iterator over the nodes of a [`QuestionSequence`]
pub struct Nodes<'a> {
    next: Option<&'a QuestionNode>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a QuestionNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next();
            node
        })
    }
}

/// Build a sequence holding `records` in input order
///
/// An empty slice yields an empty sequence.
///
/// # Example
///
/// ```
/// use examcore::quiz::{build_question_list, OperatorCode, QuestionRecord};
///
/// let records = [
///     QuestionRecord::new(1.0, OperatorCode::Add, 2.0),
///     QuestionRecord::new(9.0, OperatorCode::Div, 3.0),
/// ];
/// let list = build_question_list(&records).unwrap();
/// assert_eq!(list.to_records(), records);
/// ```
pub fn build_question_list(records: &[QuestionRecord]) -> Result<QuestionSequence, QuizError> {
    build_question_list_with(records, &mut HeapAllocator)
}

/// Build a sequence using a specific allocator
pub fn build_question_list_with<A: NodeAllocator + ?Sized>(
    records: &[QuestionRecord],
    alloc: &mut A,
) -> Result<QuestionSequence, QuizError> {
    QuestionSequence::chain_with(records, alloc)
}

/// Produce a uniformly shuffled copy of `input`
///
/// The input is only read. The result owns newly allocated nodes.
pub fn randomize<R: Rng + ?Sized>(
    input: &QuestionSequence,
    rng: &mut R,
) -> Result<QuestionSequence, QuizError> {
    randomize_with(input, rng, &mut HeapAllocator)
}

/// Shuffle `input` into a new sequence using a specific allocator
///
/// If allocation of the output fails, the partial output is released and
/// the input is left untouched.
pub fn randomize_with<R, A>(
    input: &QuestionSequence,
    rng: &mut R,
    alloc: &mut A,
) -> Result<QuestionSequence, QuizError>
where
    R: Rng + ?Sized,
    A: NodeAllocator + ?Sized,
{
    let count = input.nodes().count();
    if count == 0 {
        return Ok(QuestionSequence::new());
    }

    let mut index: Vec<&QuestionRecord> = Vec::new();
    index
        .try_reserve_exact(count)
        .map_err(|_| QuizError::AllocationFailed)?;
    index.extend(input.iter());

    fisher_yates(&mut index, rng);

    QuestionSequence::chain_with(index, alloc)
}

/// In-place Fisher-Yates shuffle
///
/// For `i` from `len - 1` down to 1, swaps `items[i]` with `items[j]` where
/// `j` is uniform in `0..=i`. This is the loop `SliceRandom::shuffle` runs.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Release every node of `sequence`, head to tail
///
/// Freeing an empty sequence is a no-op. Taking the sequence by value makes
/// a second free of the same sequence impossible.
pub fn free_question_list(sequence: QuestionSequence) {
    free_question_list_with(sequence, &mut HeapAllocator);
}

/// Release every node of `sequence` back to `alloc`
pub fn free_question_list_with<A: NodeAllocator + ?Sized>(sequence: QuestionSequence, alloc: &mut A) {
    sequence.release_with(alloc);
}

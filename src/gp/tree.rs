//! Tree chromosomes for genetic programming
//!
//! [`TreeChromosome`] arranges genes into an expression tree and
//! implements the evolutionary operators as subtree exchange (crossover)
//! and node regeneration (mutation), both capped by a maximum depth.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chromosome::traits::Chromosome;
use crate::error::ChromosomeError;
use crate::gp::gene::{ArithmeticGene, Gene, GeneKind};

/// Default depth cap for freshly generated trees
pub const DEFAULT_MAX_INITIAL_DEPTH: usize = 3;

/// Default depth cap enforced after crossover and mutation
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// A node in a gene tree
///
/// The number of children always equals the gene's arity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneNode<G> {
    /// The gene at this node
    pub gene: G,
    /// Child subtrees, one per operator argument
    pub children: Vec<GeneNode<G>>,
}

impl<G: Gene> GeneNode<G> {
    /// Create a terminal node
    pub fn terminal(gene: G) -> Self {
        Self {
            gene,
            children: Vec::new(),
        }
    }

    /// Get the depth of this subtree (a terminal has depth 1)
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|c| c.depth())
            .max()
            .unwrap_or(0)
    }

    /// Get the number of nodes in this subtree
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(|c| c.size()).sum::<usize>()
    }

    /// Get all node positions (preorder traversal paths)
    pub fn positions(&self) -> Vec<Vec<usize>> {
        let mut positions = Vec::new();
        self.collect_positions(&[], &mut positions);
        positions
    }

    fn collect_positions(&self, path: &[usize], positions: &mut Vec<Vec<usize>>) {
        positions.push(path.to_vec());
        for (i, child) in self.children.iter().enumerate() {
            let mut child_path = path.to_vec();
            child_path.push(i);
            child.collect_positions(&child_path, positions);
        }
    }

    /// Get a subtree at the given path
    pub fn get_subtree(&self, path: &[usize]) -> Option<&Self> {
        match path.split_first() {
            None => Some(self),
            Some((&idx, rest)) => self.children.get(idx).and_then(|c| c.get_subtree(rest)),
        }
    }

    /// Get a mutable subtree at the given path
    pub fn get_subtree_mut(&mut self, path: &[usize]) -> Option<&mut Self> {
        match path.split_first() {
            None => Some(self),
            Some((&idx, rest)) => self
                .children
                .get_mut(idx)
                .and_then(|c| c.get_subtree_mut(rest)),
        }
    }

    /// Replace every subtree that would exceed the depth budget with a
    /// fresh terminal
    fn prune_to_depth<R: Rng>(&mut self, depth_left: usize, rng: &mut R) {
        if depth_left <= 1 {
            if !self.children.is_empty() {
                self.gene = self.gene.create_new_of_kind(GeneKind::Argument, rng);
                self.children.clear();
            }
            return;
        }
        for child in &mut self.children {
            child.prune_to_depth(depth_left - 1, rng);
        }
    }
}

/// Grow a random subtree, forcing terminals once the depth budget runs out
fn grow_node<G: Gene, R: Rng>(prototype: &G, depth_left: usize, rng: &mut R) -> GeneNode<G> {
    let gene = if depth_left <= 1 {
        prototype.create_new_of_kind(GeneKind::Argument, rng)
    } else {
        prototype.create_new(rng)
    };
    let children = (0..gene.arity())
        .map(|_| grow_node(&gene, depth_left - 1, rng))
        .collect();
    GeneNode { gene, children }
}

/// Tree-shaped chromosome for genetic programming
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeChromosome<G> {
    root: GeneNode<G>,
    max_initial_depth: usize,
    max_depth: usize,
    fitness: f64,
}

impl<G: Gene> TreeChromosome<G> {
    /// Create a random tree from a prototype gene with default depth caps
    pub fn random<R: Rng>(prototype: &G, rng: &mut R) -> Self {
        Self::with_depths(prototype, DEFAULT_MAX_INITIAL_DEPTH, DEFAULT_MAX_DEPTH, rng)
    }

    /// Create a random tree with explicit depth caps
    ///
    /// # Panics
    /// Panics if `max_initial_depth` is zero or exceeds `max_depth`.
    pub fn with_depths<R: Rng>(
        prototype: &G,
        max_initial_depth: usize,
        max_depth: usize,
        rng: &mut R,
    ) -> Self {
        assert!(
            max_initial_depth >= 1 && max_initial_depth <= max_depth,
            "depth caps must satisfy 1 <= max_initial_depth <= max_depth"
        );
        Self {
            root: grow_node(prototype, max_initial_depth, rng),
            max_initial_depth,
            max_depth,
            fitness: 0.0,
        }
    }

    /// Get the root node
    pub fn root(&self) -> &GeneNode<G> {
        &self.root
    }

    /// Get the depth of the tree
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Get the number of nodes in the tree
    pub fn size(&self) -> usize {
        self.root.size()
    }

    /// Depth cap enforced on this tree
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn random_position<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let positions = self.root.positions();
        positions[rng.gen_range(0..positions.len())].clone()
    }
}

impl<G: Gene> Chromosome for TreeChromosome<G> {
    fn generate<R: Rng>(&mut self, rng: &mut R) {
        let prototype = self.root.gene.clone();
        self.root = grow_node(&prototype, self.max_initial_depth, rng);
    }

    fn create_offspring<R: Rng>(&self, rng: &mut R) -> Self {
        Self {
            root: grow_node(&self.root.gene, self.max_initial_depth, rng),
            max_initial_depth: self.max_initial_depth,
            max_depth: self.max_depth,
            fitness: 0.0,
        }
    }

    /// Subtree exchange: a random subtree of each tree is swapped with a
    /// random subtree of the other, then both trees are pruned back to
    /// their depth caps.
    fn crossover<R: Rng>(&mut self, peer: &mut Self, rng: &mut R) -> Result<(), ChromosomeError> {
        let own_path = self.random_position(rng);
        let peer_path = peer.random_position(rng);

        {
            let own_node = self
                .root
                .get_subtree_mut(&own_path)
                .expect("path comes from traversal");
            let peer_node = peer
                .root
                .get_subtree_mut(&peer_path)
                .expect("path comes from traversal");
            std::mem::swap(own_node, peer_node);
        }

        self.root.prune_to_depth(self.max_depth, rng);
        peer.root.prune_to_depth(peer.max_depth, rng);
        Ok(())
    }

    /// Regenerate the gene of one randomly chosen node, then reconcile
    /// its children with the new arity (extra children are dropped,
    /// missing ones are grown as fresh terminals). Nodes at the depth cap
    /// are regenerated as arguments so the cap is never violated.
    fn mutate<R: Rng>(&mut self, rng: &mut R) {
        let path = self.random_position(rng);
        let remaining = self.max_depth.saturating_sub(path.len());
        let node = self
            .root
            .get_subtree_mut(&path)
            .expect("path comes from traversal");

        if remaining <= 1 {
            node.gene.generate_of_kind(GeneKind::Argument, rng);
        } else {
            node.gene.generate(rng);
        }

        let target = node.gene.arity();
        node.children.truncate(target);
        while node.children.len() < target {
            let gene = node.gene.create_new_of_kind(GeneKind::Argument, rng);
            node.children.push(GeneNode::terminal(gene));
        }
    }

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl TreeChromosome<ArithmeticGene> {
    /// Evaluate the expression tree against input variable bindings
    pub fn execute(&self, variables: &[f64]) -> f64 {
        fn eval(node: &GeneNode<ArithmeticGene>, variables: &[f64]) -> f64 {
            let args: Vec<f64> = node.children.iter().map(|c| eval(c, variables)).collect();
            node.gene.apply(&args, variables)
        }
        eval(&self.root, variables)
    }
}

impl<G: Gene + fmt::Display> TreeChromosome<G> {
    /// Render the tree as an S-expression
    pub fn to_sexpr(&self) -> String {
        fn render<G: Gene + fmt::Display>(node: &GeneNode<G>) -> String {
            if node.children.is_empty() {
                node.gene.to_string()
            } else {
                let children: Vec<String> = node.children.iter().map(render).collect();
                format!("({} {})", node.gene, children.join(" "))
            }
        }
        render(&self.root)
    }
}

impl<G: Gene + fmt::Display> fmt::Display for TreeChromosome<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sexpr())
    }
}

// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The clustering controller and its refresh/reconcile cycle.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Size};

use covey_cluster::{Cluster, ClusteringAlgorithm, GridClustering};
use covey_geom::{GeoCoord, Projection, WebMercator};
use covey_kdtree::KdTree;

use crate::config::{Config, RefreshFlags};
use crate::delegate::ControllerDelegate;
use crate::error::ControllerError;
use crate::view::{MapView, RectFootprintOverlap};

/// What a refresh did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Nothing changed: the view was invisible or the zoom level moved
    /// less than the configured hysteresis, and the refresh was not
    /// forced.
    Skipped,
    /// The visible set was recomputed and reconciled.
    Updated {
        /// Clusters newly added to the view.
        added: usize,
        /// Clusters removed from the view.
        removed: usize,
        /// Clusters present before and after, left untouched.
        retained: usize,
    },
}

/// Owns the annotation tree and keeps a host map view's cluster
/// annotations in sync with its viewport.
///
/// Generic over the payload identity `P`, the projection, and the
/// clustering strategy; the defaults ([`WebMercator`], [`GridClustering`])
/// fit most tiled-map hosts.
pub struct ClusteringController<P, Pr = WebMercator, A = GridClustering> {
    projection: Pr,
    algorithm: A,
    tree: KdTree<P>,
    /// Clusters currently shown by the view, in emit order.
    visible: Vec<Cluster<P>>,
    last_zoom: Option<f64>,
    config: Config,
}

impl<P, Pr, A> Debug for ClusteringController<P, Pr, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClusteringController")
            .field("annotations", &self.tree.len())
            .field("visible", &self.visible.len())
            .field("last_zoom", &self.last_zoom)
            .finish_non_exhaustive()
    }
}

impl<P, Pr> ClusteringController<P, Pr>
where
    Pr: Projection,
{
    /// A controller with the grid clustering strategy and default
    /// configuration. Call [`set_annotations`] before the first refresh.
    ///
    /// [`set_annotations`]: ClusteringController::set_annotations
    pub fn new(projection: Pr) -> Self {
        Self::with_algorithm(projection, GridClustering)
    }
}

impl<P, Pr, A> ClusteringController<P, Pr, A>
where
    Pr: Projection,
{
    /// A controller with a custom clustering strategy.
    pub fn with_algorithm(projection: Pr, algorithm: A) -> Self {
        Self {
            projection,
            algorithm,
            tree: KdTree::empty(),
            visible: Vec::new(),
            last_zoom: None,
            config: Config::default(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the configuration; changes apply from the next
    /// refresh.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// The clusters currently visible, in the order they were emitted.
    pub fn visible_clusters(&self) -> &[Cluster<P>] {
        &self.visible
    }

    /// The annotation tree built by the last [`set_annotations`].
    ///
    /// [`set_annotations`]: ClusteringController::set_annotations
    pub fn tree(&self) -> &KdTree<P> {
        &self.tree
    }
}

impl<P, Pr, A> ClusteringController<P, Pr, A>
where
    P: Copy + Ord + Hash,
    Pr: Projection,
    A: ClusteringAlgorithm<P>,
{
    /// Replace the whole annotation set, rebuilding the tree.
    ///
    /// The zoom hysteresis is reset so the next refresh always observes
    /// the new tree, forced or not.
    pub fn set_annotations<I>(&mut self, annotations: I)
    where
        I: IntoIterator<Item = (P, GeoCoord)>,
    {
        self.tree = KdTree::build(annotations, &self.projection);
        self.last_zoom = None;
        log::debug!("rebuilt annotation tree with {} entries", self.tree.len());
    }

    /// Recompute the clusters for the view's current viewport and
    /// reconcile them with what the view shows.
    ///
    /// Unless [`FORCE`] is set, the refresh is skipped while the view is
    /// invisible or while the zoom level has moved less than
    /// `minimal_zoom_change` since the last completed refresh. With
    /// [`ANIMATED`], every removed cluster that folds into a surviving one
    /// gets a will/did animation event pair around the view update.
    ///
    /// [`FORCE`]: RefreshFlags::FORCE
    /// [`ANIMATED`]: RefreshFlags::ANIMATED
    pub fn refresh<V, D>(
        &mut self,
        view: &mut V,
        delegate: &mut D,
        flags: RefreshFlags,
    ) -> Result<RefreshOutcome, ControllerError>
    where
        V: MapView<P>,
        D: ControllerDelegate<P>,
    {
        if !flags.contains(RefreshFlags::FORCE) {
            if !view.is_visible() {
                log::trace!("refresh skipped: view not visible");
                return Ok(RefreshOutcome::Skipped);
            }
            if let Some(last) = self.last_zoom {
                let delta = (view.zoom_level() - last).abs();
                if delta < self.config.minimal_zoom_change {
                    log::trace!("refresh skipped: zoom delta {delta} below hysteresis");
                    return Ok(RefreshOutcome::Skipped);
                }
            }
        }

        let map_rect = view.visible_map_rect();
        if map_rect.width() < 0.0 || map_rect.height() < 0.0 {
            return Err(ControllerError::InvalidViewport);
        }
        let view_size = view.view_size();
        if view_size.width <= 0.0 || view_size.height <= 0.0 {
            return Err(ControllerError::InvalidViewport);
        }
        if self.config.grid_cell_size.width <= 0.0 || self.config.grid_cell_size.height <= 0.0 {
            return Err(covey_cluster::ClusterError::InvalidCellSize.into());
        }

        let clustering = self.config.clustering_enabled && delegate.should_cluster_annotations();
        let mut new_clusters = if clustering {
            // The configured cell size is in view points; rescale it into
            // map units for this viewport, whole units so the grid math
            // stays exact.
            let cell = Size::new(
                (self.config.grid_cell_size.width * map_rect.width() / view_size.width)
                    .round()
                    .max(1.0),
                (self.config.grid_cell_size.height * map_rect.height() / view_size.height)
                    .round()
                    .max(1.0),
            );
            let overlap = RectFootprintOverlap::new(
                &*view,
                self.config.annotation_size,
                self.config.annotation_center_offset,
            );
            self.algorithm
                .cluster_in_rect(&self.tree, map_rect, cell, &self.projection, &overlap)?
        } else {
            self.tree
                .search_range(map_rect.origin(), Point::new(map_rect.x1, map_rect.y1))
                .into_iter()
                .map(|entry| Cluster::from_members(vec![(entry.payload(), entry.coord())]))
                .collect()
        };

        for cluster in &mut new_clusters {
            delegate.configure_annotation_for_display(cluster);
        }

        let outcome = self.reconcile(new_clusters, view, delegate, flags);
        self.last_zoom = Some(view.zoom_level());
        log::debug!("refresh done: {outcome:?}");
        Ok(outcome)
    }

    /// Apply the set difference between the old and new visible clusters
    /// to the view, animating removals that fold into survivors.
    fn reconcile<V, D>(
        &mut self,
        new_clusters: Vec<Cluster<P>>,
        view: &mut V,
        delegate: &mut D,
        flags: RefreshFlags,
    ) -> RefreshOutcome
    where
        V: MapView<P>,
        D: ControllerDelegate<P>,
    {
        // Differences are computed against hash sets but emitted in list
        // order, keeping the whole refresh deterministic.
        let new_set: HashSet<&Cluster<P>> = new_clusters.iter().collect();
        let to_remove: Vec<Cluster<P>> = self
            .visible
            .iter()
            .filter(|c| !new_set.contains(*c))
            .cloned()
            .collect();

        let old_set: HashSet<&Cluster<P>> = self.visible.iter().collect();
        let to_add: Vec<Cluster<P>> = new_clusters
            .iter()
            .filter(|c| !old_set.contains(*c))
            .cloned()
            .collect();
        let retained = new_clusters.len() - to_add.len();
        drop(old_set);
        drop(new_set);

        delegate.will_update_visible_annotations();

        // A removed cluster whose members resurface inside some new
        // cluster animates into it.
        let mut transitions: Vec<(&Cluster<P>, &Cluster<P>)> = Vec::new();
        if flags.contains(RefreshFlags::ANIMATED) && !to_remove.is_empty() {
            let mut member_to_new: HashMap<P, &Cluster<P>> = HashMap::new();
            for cluster in &new_clusters {
                for &(payload, _) in cluster.members() {
                    member_to_new.insert(payload, cluster);
                }
            }
            for old in &to_remove {
                if let Some(target) = old
                    .members()
                    .iter()
                    .find_map(|(payload, _)| member_to_new.get(payload).copied())
                {
                    transitions.push((old, target));
                }
            }
        }

        for &(old, target) in &transitions {
            delegate.will_animate(old, old, target);
            view.animate_annotation(
                old,
                old,
                target,
                self.config.animation_duration,
                self.config.animation_options,
            );
        }

        view.remove_annotations(&to_remove);
        view.add_annotations(&to_add);

        for &(old, target) in &transitions {
            delegate.did_animate(old, old, target);
        }

        let outcome = RefreshOutcome::Updated {
            added: to_add.len(),
            removed: to_remove.len(),
            retained,
        };
        self.visible = new_clusters;
        outcome
    }
}

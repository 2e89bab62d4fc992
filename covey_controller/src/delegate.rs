// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optional host policy hooks.

use covey_cluster::Cluster;

/// Host hooks into the refresh lifecycle. Every method has a default, so
/// implementors override only what they care about; `()` is the no-op
/// delegate for hosts that want none of it.
///
/// Hooks are plain calls on the host's own state — they receive no access
/// back into the controller, so a misbehaving delegate cannot corrupt a
/// refresh in progress.
pub trait ControllerDelegate<P> {
    /// Runtime override for clustering. Returning false makes the next
    /// refresh place every in-viewport annotation individually, same as
    /// disabling clustering in the configuration.
    fn should_cluster_annotations(&mut self) -> bool {
        true
    }

    /// Adjust a cluster's display metadata (title, subtitle) before it is
    /// handed to the view. Membership, centroid, and radius are fixed by
    /// this point.
    fn configure_annotation_for_display(&mut self, _cluster: &mut Cluster<P>) {}

    /// Called once per refresh, after clustering and before the view's
    /// annotations change.
    fn will_update_visible_annotations(&mut self) {}

    /// `annotation` is about to animate from the position of `from` to the
    /// position of `to`.
    fn will_animate(&mut self, _annotation: &Cluster<P>, _from: &Cluster<P>, _to: &Cluster<P>) {}

    /// The animation announced by [`will_animate`] finished and the view
    /// update it covered has been applied.
    ///
    /// [`will_animate`]: ControllerDelegate::will_animate
    fn did_animate(&mut self, _annotation: &Cluster<P>, _from: &Cluster<P>, _to: &Cluster<P>) {}
}

/// The no-op delegate.
impl<P> ControllerDelegate<P> for () {}

// Copyright 2025 the Covey Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The cluster annotation: an aggregate of one or more input annotations.

use core::hash::{Hash, Hasher};

use covey_geom::{GeoCoord, haversine_meters};

/// An aggregate annotation representing one or more input annotations.
///
/// A cluster owns only the identities and coordinates of its members; the
/// annotations themselves stay with the host. Its coordinate is the
/// arithmetic mean of the member coordinates and its radius is the largest
/// great-circle distance from that centroid to any member.
///
/// Two clusters are equal (and hash equally) iff their member sets are
/// equal; members are kept sorted by payload so this is a cheap slice
/// comparison. Title and subtitle are display metadata and take no part in
/// identity.
#[derive(Clone, Debug)]
pub struct Cluster<P> {
    /// Sorted by payload.
    members: Vec<(P, GeoCoord)>,
    coord: GeoCoord,
    radius: f64,
    title: Option<String>,
    subtitle: Option<String>,
}

impl<P: Copy + Ord> Cluster<P> {
    /// Build a cluster from its member annotations.
    ///
    /// Clusters of two or more members get a default `"{n} items"` title;
    /// hosts typically rewrite it before display.
    ///
    /// # Panics
    ///
    /// Panics if `members` is empty; a cluster represents at least one
    /// annotation.
    pub fn from_members(mut members: Vec<(P, GeoCoord)>) -> Self {
        assert!(!members.is_empty(), "a cluster needs at least one member");
        members.sort_unstable_by_key(|&(payload, _)| payload);

        let mut cluster = Self {
            members,
            coord: GeoCoord::default(),
            radius: 0.0,
            title: None,
            subtitle: None,
        };
        cluster.recompute();
        cluster
    }

    /// Merge another cluster's members into this one, recomputing the
    /// centroid, radius, and default title from the combined membership.
    pub(crate) fn absorb(&mut self, other: Self) {
        self.members.extend(other.members);
        self.members.sort_unstable_by_key(|&(payload, _)| payload);
        self.recompute();
    }

    fn recompute(&mut self) {
        let n = self.members.len() as f64;
        let (lat_sum, lon_sum) = self
            .members
            .iter()
            .fold((0.0, 0.0), |(la, lo), (_, c)| (la + c.lat, lo + c.lon));
        self.coord = GeoCoord::new(lat_sum / n, lon_sum / n);

        self.radius = self
            .members
            .iter()
            .map(|&(_, c)| haversine_meters(self.coord, c))
            .fold(0.0, f64::max);

        self.title = if self.members.len() > 1 {
            Some(format!("{} items", self.members.len()))
        } else {
            None
        };
    }
}

impl<P: Copy> Cluster<P> {
    /// The centroid: mean latitude and longitude of the members.
    #[inline]
    pub fn coordinate(&self) -> GeoCoord {
        self.coord
    }

    /// Largest great-circle distance from the centroid to a member, meters.
    #[inline]
    pub fn radius_meters(&self) -> f64 {
        self.radius
    }

    /// The member annotations, sorted by payload.
    #[inline]
    pub fn members(&self) -> &[(P, GeoCoord)] {
        &self.members
    }

    /// Number of member annotations.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false; a cluster has at least one member.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether this is a real cluster (two or more members) rather than a
    /// single-annotation stand-in.
    #[inline]
    pub fn is_cluster(&self) -> bool {
        self.members.len() > 1
    }

    /// Display title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Display subtitle, if any.
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Replace the display title.
    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    /// Replace the display subtitle.
    pub fn set_subtitle(&mut self, subtitle: Option<String>) {
        self.subtitle = subtitle;
    }
}

impl<P: PartialEq> PartialEq for Cluster<P> {
    fn eq(&self, other: &Self) -> bool {
        self.members.len() == other.members.len()
            && self
                .members
                .iter()
                .zip(other.members.iter())
                .all(|((a, _), (b, _))| a == b)
    }
}

impl<P: Eq> Eq for Cluster<P> {}

impl<P: Hash> Hash for Cluster<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for (payload, _) in &self.members {
            payload.hash(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singleton_is_not_a_cluster() {
        let c = Cluster::from_members(vec![(1_u32, GeoCoord::new(40.77, -73.98))]);
        assert!(!c.is_cluster());
        assert_eq!(c.len(), 1);
        assert_eq!(c.coordinate(), GeoCoord::new(40.77, -73.98));
        assert_eq!(c.radius_meters(), 0.0);
        assert_eq!(c.title(), None);
    }

    #[test]
    fn centroid_is_mean_of_members() {
        let c = Cluster::from_members(vec![
            (0_u32, GeoCoord::new(10.0, 20.0)),
            (1_u32, GeoCoord::new(30.0, 40.0)),
        ]);
        assert_eq!(c.coordinate(), GeoCoord::new(20.0, 30.0));
        assert!(c.is_cluster());
        assert_eq!(c.title(), Some("2 items"));
    }

    #[test]
    fn radius_reaches_farthest_member() {
        let near = GeoCoord::new(0.0, 0.1);
        let far = GeoCoord::new(0.0, 1.1);
        let c = Cluster::from_members(vec![(0_u32, near), (1_u32, far)]);

        let expected = haversine_meters(c.coordinate(), far);
        assert_eq!(c.radius_meters(), expected);
        assert!(c.radius_meters() > 0.0);
    }

    #[test]
    fn identical_points_have_zero_radius() {
        let p = GeoCoord::new(0.0, 0.0);
        let c = Cluster::from_members((0..100_u32).map(|i| (i, p)).collect());
        assert_eq!(c.radius_meters(), 0.0);
        assert_eq!(c.coordinate(), p);
    }

    #[test]
    fn equality_ignores_member_order_and_titles() {
        let a = GeoCoord::new(1.0, 2.0);
        let b = GeoCoord::new(3.0, 4.0);
        let mut x = Cluster::from_members(vec![(0_u32, a), (1_u32, b)]);
        let y = Cluster::from_members(vec![(1_u32, b), (0_u32, a)]);

        x.set_title(Some("custom".into()));
        assert_eq!(x, y);
    }

    #[test]
    fn different_members_are_unequal() {
        let a = Cluster::from_members(vec![(0_u32, GeoCoord::default())]);
        let b = Cluster::from_members(vec![(1_u32, GeoCoord::default())]);
        assert_ne!(a, b);
    }

    #[test]
    fn absorb_recomputes_aggregate() {
        let mut a = Cluster::from_members(vec![(0_u32, GeoCoord::new(0.0, 0.0))]);
        let b = Cluster::from_members(vec![(1_u32, GeoCoord::new(0.0, 2.0))]);
        a.absorb(b);

        assert_eq!(a.len(), 2);
        assert_eq!(a.coordinate(), GeoCoord::new(0.0, 1.0));
        assert!(a.radius_meters() > 0.0);
        assert_eq!(a.title(), Some("2 items"));
    }
}

use num_traits::Float;

pub type Vector3<ItemT> = (ItemT, ItemT, ItemT); // (x, y, z)

// a x b
pub fn cross<ItemT: Float>(a: Vector3<ItemT>, b: Vector3<ItemT>) -> Vector3<ItemT> {
    (
        (a.1 * b.2) - (a.2 * b.1),
        (a.2 * b.0) - (a.0 * b.2),
        (a.0 * b.1) - (a.1 * b.0),
    )
}

// remainder of x / y with the sign of y
pub fn wrap<ItemT: Float>(x: ItemT, y: ItemT) -> ItemT {
    x - y * (x / y).floor()
}

// angle in degrees mapped into [0, 360)
pub fn wrap_degrees<ItemT: Float>(angle: ItemT) -> ItemT {
    let full_turn = ItemT::from(360.0).unwrap_or_else(ItemT::nan);
    let wrapped = wrap(angle, full_turn);
    // tiny negative angles round up to a full turn
    if wrapped >= full_turn {
        ItemT::zero()
    } else {
        wrapped
    }
}

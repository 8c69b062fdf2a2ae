//! Menu labels, keyboards and message copy for the dialogue engine.
//!
//! Labels double as dispatch tokens: pressing a reply-keyboard button
//! sends its label back as text, so the constants here are matched
//! verbatim in the dispatcher.

use bot_types::{
	format_timestamp, format_usd, Action, ActionButton, ActionMenu, Cart, CartLine, CatalogItem,
	Catalog, Category, Order, PricingRule, ReplyMenu, StoreProfile,
};

pub const LABEL_SHOP_GROCERIES: &str = "Shop Groceries";
pub const LABEL_MY_CART: &str = "My Cart";
pub const LABEL_VIEW_CART: &str = "View Cart";
pub const LABEL_TRACK_ORDER: &str = "Track Order";
pub const LABEL_CONTACT_STORE: &str = "Contact Store";
pub const LABEL_STORE_INFO: &str = "Store Info";
pub const LABEL_MAIN_MENU: &str = "Main Menu";
pub const LABEL_CONTINUE_SHOPPING: &str = "Continue Shopping";
pub const LABEL_ADD_MORE_ITEMS: &str = "Add More Items";
pub const LABEL_START_SHOPPING: &str = "Start Shopping";
pub const LABEL_CLEAR_CART: &str = "Clear Cart";
pub const LABEL_CHECKOUT_NOW: &str = "Checkout Now";
pub const LABEL_CHECKOUT: &str = "Checkout";

/// Reply to admin-prefixed actions from anyone but the admin.
pub const UNAUTHORIZED: &str = "Unauthorized access.";

/// Generic apology shown when event handling fails unexpectedly.
pub const APOLOGY: &str = "Sorry, an error occurred. Please try again.";

/// The main menu keyboard.
pub fn main_menu() -> ReplyMenu {
	ReplyMenu::new([
		vec![LABEL_SHOP_GROCERIES, LABEL_MY_CART],
		vec![LABEL_TRACK_ORDER, LABEL_CONTACT_STORE],
		vec![LABEL_STORE_INFO],
	])
}

/// The category picker keyboard: category names two per row, with a
/// Main Menu button at the end.
pub fn categories_menu(catalog: &Catalog) -> ReplyMenu {
	let mut rows: Vec<Vec<String>> = Vec::new();
	for pair in catalog.category_names().chunks(2) {
		rows.push(pair.iter().map(|name| name.to_string()).collect());
	}
	match rows.last_mut() {
		Some(last) if last.len() == 1 => last.push(LABEL_MAIN_MENU.to_string()),
		_ => rows.push(vec![LABEL_MAIN_MENU.to_string()]),
	}
	ReplyMenu { rows }
}

/// Keyboard offered right after an item lands in the cart.
pub fn after_add_menu() -> ReplyMenu {
	ReplyMenu::new([
		[LABEL_VIEW_CART, LABEL_CONTINUE_SHOPPING],
		[LABEL_CHECKOUT, LABEL_MAIN_MENU],
	])
}

/// Keyboard shown under a non-empty cart view.
pub fn cart_menu() -> ReplyMenu {
	ReplyMenu::new([
		vec![LABEL_ADD_MORE_ITEMS, LABEL_CLEAR_CART],
		vec![LABEL_CHECKOUT_NOW, LABEL_CONTINUE_SHOPPING],
		vec![LABEL_MAIN_MENU],
	])
}

/// Keyboard shown under an empty cart view.
pub fn empty_cart_menu() -> ReplyMenu {
	ReplyMenu::new([[LABEL_START_SHOPPING, LABEL_MAIN_MENU]])
}

/// The welcome presentation text.
pub fn welcome_text(store: &StoreProfile, pricing: &PricingRule) -> String {
	format!(
		"Welcome to {name} Grocery Delivery!\n\n\
		<b>Fresh groceries delivered to your doorstep.</b>\n\n\
		- Free delivery on orders over {threshold}\n\
		- Delivery hours: {hours}\n\
		- Payment: Cash on Delivery only\n\
		- Real-time order tracking\n\n\
		<b>What would you like to do?</b>",
		name = store.name,
		threshold = format_usd(pricing.free_delivery_threshold),
		hours = store.hours,
	)
}

/// The category picker text.
pub fn categories_text() -> String {
	"Grocery Categories\n\nChoose a category to start shopping:".to_string()
}

/// The item list text for one category.
pub fn category_items_text(category: &Category) -> String {
	format!("{}\n\nSelect an item to add to cart:", category.name)
}

/// The inline menu for one category: one add-to-cart button per item,
/// plus a back/view-cart row.
pub fn category_items_menu(category: &Category) -> ActionMenu {
	let mut rows: Vec<Vec<ActionButton>> = category
		.items
		.iter()
		.map(|item| {
			vec![ActionButton::new(
				format!(
					"{} - {}/{}",
					item.name,
					format_usd(item.price),
					item.unit
				),
				Action::AddItem(item.name.clone()),
			)]
		})
		.collect();
	rows.push(vec![
		ActionButton::new("Back to Categories", Action::BackToCategories),
		ActionButton::new("View Cart", Action::ViewCart),
	]);
	ActionMenu { rows }
}

/// Acknowledgement after an item is added to the cart.
pub fn added_to_cart_text(item: &CatalogItem) -> String {
	format!(
		"Added to cart!\n\n{} - {}/{}\n\nWhat would you like to do next?",
		item.name,
		format_usd(item.price),
		item.unit,
	)
}

/// Renders cart/order lines with per-line totals.
fn format_lines(lines: &[CartLine]) -> String {
	lines
		.iter()
		.map(|line| {
			format!(
				"- {}\n  {}/{} x {} = {}",
				line.item,
				format_usd(line.unit_price),
				line.unit,
				line.quantity,
				format_usd(line.line_total()),
			)
		})
		.collect::<Vec<_>>()
		.join("\n")
}

/// The empty cart view text.
pub fn empty_cart_text() -> String {
	"Your cart is empty!\n\nStart shopping to add some fresh groceries.".to_string()
}

/// The cart view with totals and the free-delivery note.
pub fn cart_view_text(cart: &Cart, pricing: &PricingRule) -> String {
	let totals = pricing.quote(cart);
	let delivery_note = match pricing.remaining_for_free_delivery(totals.subtotal) {
		Some(remaining) => format!("Add {} more for free delivery!", format_usd(remaining)),
		None => "You qualify for free delivery!".to_string(),
	};

	format!(
		"Your Shopping Cart\n\n\
		{lines}\n\n\
		Subtotal: {subtotal}\n\
		Delivery: {fee}\n\
		Total: {total}\n\n\
		{note}",
		lines = format_lines(&cart.lines),
		subtotal = format_usd(totals.subtotal),
		fee = format_usd(totals.delivery_fee),
		total = format_usd(totals.total),
		note = delivery_note,
	)
}

/// Prompt opening the checkout wizard.
pub fn checkout_name_prompt() -> String {
	"Let's get your order delivered!\n\nPlease provide your full name:".to_string()
}

/// Prompt for the phone number step.
pub fn checkout_phone_prompt(name: &str) -> String {
	format!(
		"Thanks {}! Now please provide your phone number for delivery updates:",
		name
	)
}

/// Prompt for the address step.
pub fn checkout_address_prompt() -> String {
	"Great! Now please provide your delivery address:".to_string()
}

/// Prompt for the special instructions step.
pub fn checkout_instructions_prompt() -> String {
	"Any special delivery instructions?\n\n\
	(e.g., 'Leave at door', 'Call before delivery', or type 'None'):"
		.to_string()
}

/// Reply when checkout starts with an empty cart.
pub fn checkout_empty_cart_text() -> String {
	"Your cart is empty! Please add items first.".to_string()
}

/// The customer order confirmation.
pub fn confirmation_text(order: &Order, store: &StoreProfile, pricing: &PricingRule) -> String {
	let delivery_note = match pricing.remaining_for_free_delivery(order.totals.subtotal) {
		Some(_) => String::new(),
		None => "\nFree delivery applied.".to_string(),
	};
	let instructions = if order.instructions.is_empty() {
		"None"
	} else {
		&order.instructions
	};

	format!(
		"Order Confirmed!\n\n\
		Thank you {name}!\n\n\
		ORDER SUMMARY\n\n\
		Customer details:\n\
		Name: {name}\n\
		Phone: {phone}\n\
		Address: {address}\n\n\
		Items:\n\
		{lines}\n\n\
		Subtotal: {subtotal}\n\
		Delivery fee: {fee}{delivery_note}\n\
		Total: {total}\n\n\
		Special instructions: {instructions}\n\n\
		Order ID: #{id}\n\
		Payment: Cash on Delivery\n\
		Please have {total} ready for our delivery driver.\n\n\
		Expected delivery: within 2 hours\n\
		Order time: {time}\n\n\
		We'll notify you when your order ships!",
		name = order.customer_name,
		phone = order.phone,
		address = order.address,
		lines = format_lines(&order.lines),
		subtotal = format_usd(order.totals.subtotal),
		fee = format_usd(order.totals.delivery_fee),
		delivery_note = delivery_note,
		total = format_usd(order.totals.total),
		instructions = instructions,
		id = order.id,
		time = format_timestamp(order.created_at),
	)
}

/// Reply to the customer after clearing the cart.
pub fn cart_cleared_text() -> String {
	"Your cart has been cleared!".to_string()
}

/// The new-order alert sent to the admin operator.
pub fn admin_alert_text(order: &Order) -> String {
	let items = order
		.lines
		.iter()
		.map(|line| format!("- {} - {} {}", line.item, line.quantity, line.unit))
		.collect::<Vec<_>>()
		.join("\n");

	format!(
		"NEW ORDER #{id}\n\n\
		Customer: {name}\n\
		Phone: {phone}\n\
		Address: {address}\n\n\
		Items:\n\
		{items}\n\n\
		Total: {total}\n\n\
		Order time: {time}\n\
		Status: {status}\n\n\
		Choose action:",
		id = order.id,
		name = order.customer_name,
		phone = order.phone,
		address = order.address,
		items = items,
		total = format_usd(order.totals.total),
		time = format_timestamp(order.created_at),
		status = order.status,
	)
}

/// The four admin action buttons for one order.
pub fn admin_actions_menu(order_id: &str) -> ActionMenu {
	ActionMenu {
		rows: vec![
			vec![
				ActionButton::new("Mark as Shipped", Action::Ship(order_id.to_string())),
				ActionButton::new("Cancel Order", Action::Cancel(order_id.to_string())),
			],
			vec![
				ActionButton::new("Mark Delivered", Action::Deliver(order_id.to_string())),
				ActionButton::new("View Details", Action::Details(order_id.to_string())),
			],
		],
	}
}

/// The full order record, shown to the admin on request.
pub fn order_details_text(order: &Order) -> String {
	let items = order
		.lines
		.iter()
		.map(|line| format!("- {} - {} {}", line.item, line.quantity, line.unit))
		.collect::<Vec<_>>()
		.join("\n");

	format!(
		"Order Details #{id}\n\n\
		Customer: {name}\n\
		Phone: {phone}\n\
		Address: {address}\n\
		Status: {status}\n\
		Total: {total}\n\
		Created: {created}\n\
		Updated: {updated}\n\n\
		Items:\n\
		{items}",
		id = order.id,
		name = order.customer_name,
		phone = order.phone,
		address = order.address,
		status = order.status,
		total = format_usd(order.totals.total),
		created = format_timestamp(order.created_at),
		updated = format_timestamp(order.updated_at),
		items = items,
	)
}

/// The order history view, most recent orders last.
pub fn track_orders_text(orders: &[Order]) -> String {
	let mut text = "Your orders:\n".to_string();
	for order in orders {
		text.push_str(&format!(
			"\nOrder #{id}\nStatus: {status}\nTotal: {total}\nDate: {date}\n",
			id = order.id,
			status = order.status,
			total = format_usd(order.totals.total),
			date = format_timestamp(order.created_at),
		));
	}
	text
}

/// Shown when the customer has no orders yet.
pub fn no_orders_text() -> String {
	"You don't have any orders yet. Start shopping!".to_string()
}

/// The contact card.
pub fn contact_text(store: &StoreProfile) -> String {
	format!(
		"{name} Contact Info:\n\n\
		Store: {name} Grocery\n\
		Phone: {phone}\n\
		Address: {address}\n\
		Hours: {hours}",
		name = store.name,
		phone = store.contact_phone,
		address = store.address,
		hours = store.hours,
	)
}

/// The store information card.
pub fn store_info_text(store: &StoreProfile, pricing: &PricingRule) -> String {
	format!(
		"{name} Grocery\n\n\
		Your trusted local grocery store!\n\n\
		- Free delivery on orders over {threshold}\n\
		- Cash on delivery only\n\
		- Fast 2-hour delivery\n\
		- Fresh produce daily\n\
		- Call: {phone}",
		name = store.name,
		threshold = format_usd(pricing.free_delivery_threshold),
		phone = store.contact_phone,
	)
}
